use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 账单明细行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// 行唯一标识, 仅作行键, 不参与汇总
    pub line_item_id: String,
    pub product_name: String,
    pub product_family: String,
    /// 项目标签, 未打标签时为 None
    pub project_tag: Option<String>,
    /// 未混合成本, 退款/抵扣时为负
    pub unblended_cost: BigDecimal,
}

/// 一次执行加载的完整账单, 按文件顺序
pub type Ledger = Vec<LineItem>;
