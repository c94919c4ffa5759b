use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

/// 汇总矩阵的列键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpendColumn {
    /// 项目标签列
    Tag(String),
    /// 未打标签列, 输出为 "(blank)"
    Untagged,
    /// 行合计列, 输出为 "All"
    Total,
}

impl SpendColumn {
    pub fn label(&self) -> &str {
        match self {
            SpendColumn::Tag(tag) => tag,
            SpendColumn::Untagged => "(blank)",
            SpendColumn::Total => "All",
        }
    }
}

/// 汇总矩阵的行键: (产品名, 产品族), 要求唯一
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey {
    pub product_name: String,
    pub product_family: String,
}

impl ProductKey {
    pub fn new(product_name: impl Into<String>, product_family: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            product_family: product_family.into(),
        }
    }
}

/// 产品 x 项目标签 的支出矩阵
///
/// 列顺序: 标签列按首次出现序, 然后未打标签列, 最后行合计列.
/// 每个 (行, 列) 组合都有值, 缺失组合为0, 不存在空单元格.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendMatrix {
    columns: Vec<SpendColumn>,
    cells: IndexMap<ProductKey, IndexMap<SpendColumn, BigDecimal>>,
    /// 合计行 "All": 每列对所有产品行求和
    totals: IndexMap<SpendColumn, BigDecimal>,
}

/// 单列报表视图: 金额四舍五入到2位, 为0的行已去掉
#[derive(Debug, Clone)]
pub struct ColumnReport {
    pub column: SpendColumn,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub product_name: String,
    pub product_family: String,
    /// 已四舍五入到2位
    pub amount: BigDecimal,
}

impl SpendMatrix {
    pub(crate) fn new(
        columns: Vec<SpendColumn>,
        cells: IndexMap<ProductKey, IndexMap<SpendColumn, BigDecimal>>,
        totals: IndexMap<SpendColumn, BigDecimal>,
    ) -> Self {
        Self {
            columns,
            cells,
            totals,
        }
    }

    pub fn columns(&self) -> &[SpendColumn] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &ProductKey> {
        self.cells.keys()
    }

    /// 单元格取值, 未出现的组合为0
    pub fn cell(&self, row: &ProductKey, column: &SpendColumn) -> BigDecimal {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or_else(BigDecimal::zero)
    }

    /// 合计行取值
    pub fn total(&self, column: &SpendColumn) -> BigDecimal {
        self.totals
            .get(column)
            .cloned()
            .unwrap_or_else(BigDecimal::zero)
    }

    /// 总计 (合计行 x 行合计列)
    pub fn grand_total(&self) -> BigDecimal {
        self.total(&SpendColumn::Total)
    }

    /// 生成单列报表: 含合计行, 四舍五入后为0的行去掉
    pub fn column_report(&self, column: &SpendColumn) -> ColumnReport {
        let mut entries = Vec::new();
        for (key, row) in &self.cells {
            let rounded = row
                .get(column)
                .cloned()
                .unwrap_or_else(BigDecimal::zero)
                .round(2);
            if !rounded.is_zero() {
                entries.push(ReportEntry {
                    product_name: key.product_name.clone(),
                    product_family: key.product_family.clone(),
                    amount: rounded,
                });
            }
        }

        let total = self.total(column).round(2);
        if !total.is_zero() {
            entries.push(ReportEntry {
                product_name: SpendColumn::Total.label().to_string(),
                product_family: String::new(),
                amount: total,
            });
        }

        ColumnReport {
            column: column.clone(),
            entries,
        }
    }
}
