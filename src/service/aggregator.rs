use bigdecimal::{BigDecimal, Zero};
use indexmap::{IndexMap, IndexSet};

use crate::models::{Ledger, ProductKey, SpendColumn, SpendMatrix};

/// 把账单明细汇总成 产品 x 项目标签 的支出矩阵
///
/// 纯函数, 不改输入, 同一账单重复调用结果一致.
pub fn aggregate(ledger: &Ledger) -> SpendMatrix {
    // 1. 分组求和: 行键 (产品名, 产品族), 列键 项目标签, 未打标签直接归入 Untagged 列
    let mut tag_order: IndexSet<String> = IndexSet::new(); // 保序去重
    let mut sums: IndexMap<ProductKey, IndexMap<SpendColumn, BigDecimal>> = IndexMap::new();

    for item in ledger {
        let column = match &item.project_tag {
            Some(tag) => {
                tag_order.insert(tag.clone());
                SpendColumn::Tag(tag.clone())
            }
            None => SpendColumn::Untagged,
        };
        let key = ProductKey::new(&item.product_name, &item.product_family);
        let cell = sums
            .entry(key)
            .or_default()
            .entry(column)
            .or_insert_with(BigDecimal::zero);
        *cell = &*cell + &item.unblended_cost;
    }

    // 2. 列顺序: 标签列按首次出现序, 然后未打标签列, 最后行合计列
    let mut columns: Vec<SpendColumn> =
        tag_order.into_iter().map(SpendColumn::Tag).collect();
    columns.push(SpendColumn::Untagged);
    columns.push(SpendColumn::Total);

    // 3. 行按 (产品名, 产品族) 排序; 缺失组合补0; 行合计 = 各标签列之和
    sums.sort_keys();
    let mut cells: IndexMap<ProductKey, IndexMap<SpendColumn, BigDecimal>> =
        IndexMap::with_capacity(sums.len());
    for (key, row) in &sums {
        let mut filled: IndexMap<SpendColumn, BigDecimal> =
            IndexMap::with_capacity(columns.len());
        let mut row_total = BigDecimal::zero();
        for column in &columns {
            if *column == SpendColumn::Total {
                continue;
            }
            let value = row.get(column).cloned().unwrap_or_else(BigDecimal::zero);
            row_total = &row_total + &value;
            filled.insert(column.clone(), value);
        }
        filled.insert(SpendColumn::Total, row_total);
        cells.insert(key.clone(), filled);
    }

    // 4. 合计行: 每列对所有产品行求和, 未打标签列同样参与, 无需事后修补
    let mut totals: IndexMap<SpendColumn, BigDecimal> =
        IndexMap::with_capacity(columns.len());
    for column in &columns {
        let mut column_sum = BigDecimal::zero();
        for row in cells.values() {
            if let Some(value) = row.get(column) {
                column_sum = &column_sum + value;
            }
        }
        totals.insert(column.clone(), column_sum);
    }

    // 总计必须等于全部明细逐行求和
    debug_assert_eq!(
        totals
            .get(&SpendColumn::Total)
            .cloned()
            .unwrap_or_else(BigDecimal::zero),
        ledger
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + &item.unblended_cost)
    );

    SpendMatrix::new(columns, cells, totals)
}
