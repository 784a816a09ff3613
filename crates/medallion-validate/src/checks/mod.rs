//! Quality check definitions.
//!
//! Every check is a predicate over one silver table or gold view that returns
//! the offending rows; an empty frame is a pass. Listings return the distinct
//! values of a column instead and never fail.

pub mod amounts;
pub mod dates;
pub mod keys;
pub mod text;

use chrono::NaiveDate;
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};

use medallion_model::columns::{
    CAT, CID, CNTRY, CST_FIRSTNAME, CST_GNDR, CST_ID, CST_LASTNAME, CST_MARITAL_STATUS,
    CUSTOMER_KEY, GEN, ID, MAINTENANCE, PRD_ID, PRD_LINE, PRD_NM, PRODUCT_KEY, SUBCAT,
};
use medallion_model::{CheckKind, GoldView, Layer, TableKind, TableRegistry};
use medallion_warehouse::{GoldFrames, Warehouse};

use crate::error::ValidateError;

/// Keep the rows where `mask` is true.
pub(crate) fn filter_rows(df: &DataFrame, mask: &[bool]) -> PolarsResult<DataFrame> {
    df.filter(&BooleanChunked::from_slice("mask".into(), mask))
}

/// What a check reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTarget {
    Silver(TableKind),
    Gold(GoldView),
}

impl CheckTarget {
    pub fn qualified_name(self, registry: &TableRegistry) -> String {
        match self {
            Self::Silver(kind) => registry.qualified_name(Layer::Silver, kind),
            Self::Gold(view) => registry.qualified_view(view),
        }
    }
}

/// The predicate a check evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRule {
    KeyUnique(&'static str),
    ReferentialIntegrity,
    NaturalKey(&'static str),
    Whitespace(&'static str),
    DistinctValues(&'static str),
    ProductDateOrder,
    ProductCost,
    SalesDateOrder,
    SalesArithmetic,
    BirthdateRange,
}

/// Inputs shared by every check of a suite run.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub warehouse: &'a Warehouse,
    pub gold: &'a GoldFrames,
    /// Upper bound for plausible birthdates.
    pub as_of: NaiveDate,
}

impl CheckInput<'_> {
    fn frame(&self, target: CheckTarget) -> Result<&DataFrame, ValidateError> {
        match target {
            CheckTarget::Silver(kind) => Ok(self.warehouse.require(Layer::Silver, kind)?),
            CheckTarget::Gold(view) => Ok(self.gold.get(view)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityCheck {
    pub name: String,
    pub target: CheckTarget,
    pub rule: CheckRule,
    pub description: String,
}

impl QualityCheck {
    fn new(target: CheckTarget, rule: CheckRule, suffix: &str, description: String) -> Self {
        let prefix = match target {
            CheckTarget::Silver(kind) => kind.table_name(),
            CheckTarget::Gold(view) => view.view_name(),
        };
        Self {
            name: format!("{prefix}_{suffix}"),
            target,
            rule,
            description,
        }
    }

    pub fn kind(&self) -> CheckKind {
        match self.rule {
            CheckRule::DistinctValues(_) => CheckKind::Listing,
            _ => CheckKind::Assertion,
        }
    }

    /// Offending rows, or the distinct values for listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the target table is not loaded or lacks a column
    /// the rule reads.
    pub fn evaluate(&self, input: &CheckInput<'_>) -> Result<DataFrame, ValidateError> {
        let df = input.frame(self.target)?;
        let result = match self.rule {
            CheckRule::KeyUnique(column) => keys::duplicate_keys(df, column),
            CheckRule::ReferentialIntegrity => keys::unresolved_references(df),
            CheckRule::NaturalKey(column) => keys::invalid_natural_keys(df, column),
            CheckRule::Whitespace(column) => text::untrimmed_values(df, column),
            CheckRule::DistinctValues(column) => text::distinct_values(df, column),
            CheckRule::ProductDateOrder => dates::product_end_before_start(df),
            CheckRule::ProductCost => amounts::invalid_costs(df),
            CheckRule::SalesDateOrder => dates::order_after_ship_or_due(df),
            CheckRule::SalesArithmetic => amounts::inconsistent_sales(df),
            CheckRule::BirthdateRange => dates::birthdates_out_of_range(df, input.as_of),
        };
        result.map_err(|source| ValidateError::Evaluation {
            check: self.name.clone(),
            source,
        })
    }
}

/// The full check catalog in reporting order.
pub fn default_checks() -> Vec<QualityCheck> {
    use CheckRule::{
        BirthdateRange, DistinctValues, KeyUnique, NaturalKey, ProductCost, ProductDateOrder,
        ReferentialIntegrity, SalesArithmetic, SalesDateOrder, Whitespace,
    };
    use CheckTarget::{Gold, Silver};

    let mut checks = vec![
        QualityCheck::new(
            Gold(GoldView::DimCustomers),
            KeyUnique(CUSTOMER_KEY),
            "key_unique",
            "customer surrogate key is unique".to_string(),
        ),
        QualityCheck::new(
            Gold(GoldView::DimProducts),
            KeyUnique(PRODUCT_KEY),
            "key_unique",
            "product surrogate key is unique".to_string(),
        ),
        QualityCheck::new(
            Gold(GoldView::FactSales),
            ReferentialIntegrity,
            "referential_integrity",
            "every sale resolves to a product and a customer".to_string(),
        ),
    ];

    let natural_keys = [
        (TableKind::CrmCustInfo, CST_ID),
        (TableKind::CrmPrdInfo, PRD_ID),
        (TableKind::ErpCustAz12, CID),
        (TableKind::ErpLocA101, CID),
        (TableKind::ErpPxCatG1v2, ID),
    ];
    checks.extend(natural_keys.into_iter().map(|(kind, column)| {
        QualityCheck::new(
            Silver(kind),
            NaturalKey(column),
            "natural_key",
            format!("{column} is present and unique"),
        )
    }));

    let trimmed = [
        (TableKind::CrmCustInfo, CST_FIRSTNAME),
        (TableKind::CrmCustInfo, CST_LASTNAME),
        (TableKind::CrmPrdInfo, PRD_NM),
        (TableKind::ErpLocA101, CNTRY),
        (TableKind::ErpPxCatG1v2, CAT),
        (TableKind::ErpPxCatG1v2, SUBCAT),
        (TableKind::ErpPxCatG1v2, MAINTENANCE),
    ];
    checks.extend(trimmed.into_iter().map(|(kind, column)| {
        QualityCheck::new(
            Silver(kind),
            Whitespace(column),
            &format!("{column}_whitespace"),
            format!("{column} has no leading or trailing spaces"),
        )
    }));

    checks.extend([
        QualityCheck::new(
            Silver(TableKind::CrmPrdInfo),
            ProductDateOrder,
            "date_order",
            "product versions do not end before they start".to_string(),
        ),
        QualityCheck::new(
            Silver(TableKind::CrmPrdInfo),
            ProductCost,
            "cost",
            "product cost is present and not negative".to_string(),
        ),
        QualityCheck::new(
            Silver(TableKind::CrmSalesDetails),
            SalesDateOrder,
            "date_order",
            "orders precede shipping and due dates".to_string(),
        ),
        QualityCheck::new(
            Silver(TableKind::CrmSalesDetails),
            SalesArithmetic,
            "arithmetic",
            "sales equal quantity times price, all positive".to_string(),
        ),
        QualityCheck::new(
            Silver(TableKind::ErpCustAz12),
            BirthdateRange,
            "birthdate_range",
            "birthdates lie between 1924-01-01 and the load date".to_string(),
        ),
    ]);

    let listings = [
        (TableKind::CrmCustInfo, CST_MARITAL_STATUS),
        (TableKind::CrmCustInfo, CST_GNDR),
        (TableKind::CrmPrdInfo, PRD_LINE),
        (TableKind::ErpCustAz12, GEN),
        (TableKind::ErpLocA101, CNTRY),
        (TableKind::ErpPxCatG1v2, CAT),
        (TableKind::ErpPxCatG1v2, SUBCAT),
        (TableKind::ErpPxCatG1v2, MAINTENANCE),
    ];
    checks.extend(listings.into_iter().map(|(kind, column)| {
        QualityCheck::new(
            Silver(kind),
            DistinctValues(column),
            &format!("{column}_values"),
            format!("distinct {column} values"),
        )
    }));

    checks
}
