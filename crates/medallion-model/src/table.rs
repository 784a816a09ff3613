//! Layers, source tables and gold views.
//!
//! Each source table exists once in bronze (raw mirror of the extract) and
//! once in silver (standardized form). Gold views are derived on read and
//! have no storage of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{
    BDATE, BIRTHDATE, CAT, CAT_ID, CATEGORY, CATEGORY_ID, CID, CNTRY, COST, COUNTRY,
    CREATE_DATE, CST_CREATE_DATE, CST_FIRSTNAME, CST_GNDR, CST_ID, CST_KEY, CST_LASTNAME,
    CST_MARITAL_STATUS, CUSTOMER_ID, CUSTOMER_KEY, CUSTOMER_NUMBER, DUE_DATE, DWH_CREATE_DATE,
    FIRST_NAME, GEN, GENDER, ID, LAST_NAME, MAINTENANCE, MARITAL_STATUS, ORDER_DATE,
    ORDER_NUMBER, PRD_COST, PRD_END_DT, PRD_ID, PRD_KEY, PRD_LINE, PRD_NM, PRD_START_DT, PRICE,
    PRODUCT_ID, PRODUCT_KEY, PRODUCT_LINE, PRODUCT_NAME, PRODUCT_NUMBER, QUANTITY, SALES_AMOUNT,
    SHIPPING_DATE, SLS_CUST_ID, SLS_DUE_DT, SLS_ORD_NUM, SLS_ORDER_DT, SLS_PRD_KEY, SLS_PRICE,
    SLS_QUANTITY, SLS_SALES, SLS_SHIP_DT, START_DATE, SUBCAT, SUBCATEGORY,
};

/// Warehouse layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Raw mirror of the source extracts.
    Bronze,
    /// Cleansed, standardized tables.
    Silver,
    /// Star schema projections.
    Gold,
}

impl Layer {
    pub const fn default_schema(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_schema())
    }
}

/// Origin system of a source extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSystem {
    Crm,
    Erp,
}

impl SourceSystem {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crm => "CRM",
            Self::Erp => "ERP",
        }
    }
}

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// UTF-8 text.
    Text,
    /// Calendar date stored as `YYYY-MM-DD`.
    Date,
    /// Date and time stored as `YYYY-MM-DD HH:MM:SS`.
    DateTime,
}

/// A named, typed column of a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn col(name: &'static str, column_type: ColumnType) -> ColumnDef {
    ColumnDef { name, column_type }
}

/// The six source tables, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    CrmCustInfo,
    CrmPrdInfo,
    CrmSalesDetails,
    ErpLocA101,
    ErpCustAz12,
    ErpPxCatG1v2,
}

const RAW_CUST_INFO: &[ColumnDef] = &[
    col(CST_ID, ColumnType::Int),
    col(CST_KEY, ColumnType::Text),
    col(CST_FIRSTNAME, ColumnType::Text),
    col(CST_LASTNAME, ColumnType::Text),
    col(CST_MARITAL_STATUS, ColumnType::Text),
    col(CST_GNDR, ColumnType::Text),
    col(CST_CREATE_DATE, ColumnType::Date),
];

const RAW_PRD_INFO: &[ColumnDef] = &[
    col(PRD_ID, ColumnType::Int),
    col(PRD_KEY, ColumnType::Text),
    col(PRD_NM, ColumnType::Text),
    col(PRD_COST, ColumnType::Int),
    col(PRD_LINE, ColumnType::Text),
    col(PRD_START_DT, ColumnType::DateTime),
    col(PRD_END_DT, ColumnType::DateTime),
];

const RAW_SALES_DETAILS: &[ColumnDef] = &[
    col(SLS_ORD_NUM, ColumnType::Text),
    col(SLS_PRD_KEY, ColumnType::Text),
    col(SLS_CUST_ID, ColumnType::Int),
    col(SLS_ORDER_DT, ColumnType::Int),
    col(SLS_SHIP_DT, ColumnType::Int),
    col(SLS_DUE_DT, ColumnType::Int),
    col(SLS_SALES, ColumnType::Int),
    col(SLS_QUANTITY, ColumnType::Int),
    col(SLS_PRICE, ColumnType::Int),
];

const RAW_LOC_A101: &[ColumnDef] = &[col(CID, ColumnType::Text), col(CNTRY, ColumnType::Text)];

const RAW_CUST_AZ12: &[ColumnDef] = &[
    col(CID, ColumnType::Text),
    col(BDATE, ColumnType::Date),
    col(GEN, ColumnType::Text),
];

const RAW_PX_CAT_G1V2: &[ColumnDef] = &[
    col(ID, ColumnType::Text),
    col(CAT, ColumnType::Text),
    col(SUBCAT, ColumnType::Text),
    col(MAINTENANCE, ColumnType::Text),
];

const SILVER_CUST_INFO: &[ColumnDef] = &[
    col(CST_ID, ColumnType::Int),
    col(CST_KEY, ColumnType::Text),
    col(CST_FIRSTNAME, ColumnType::Text),
    col(CST_LASTNAME, ColumnType::Text),
    col(CST_MARITAL_STATUS, ColumnType::Text),
    col(CST_GNDR, ColumnType::Text),
    col(CST_CREATE_DATE, ColumnType::Date),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

const SILVER_PRD_INFO: &[ColumnDef] = &[
    col(PRD_ID, ColumnType::Int),
    col(CAT_ID, ColumnType::Text),
    col(PRD_KEY, ColumnType::Text),
    col(PRD_NM, ColumnType::Text),
    col(PRD_COST, ColumnType::Int),
    col(PRD_LINE, ColumnType::Text),
    col(PRD_START_DT, ColumnType::Date),
    col(PRD_END_DT, ColumnType::Date),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

const SILVER_SALES_DETAILS: &[ColumnDef] = &[
    col(SLS_ORD_NUM, ColumnType::Text),
    col(SLS_PRD_KEY, ColumnType::Text),
    col(SLS_CUST_ID, ColumnType::Int),
    col(SLS_ORDER_DT, ColumnType::Date),
    col(SLS_SHIP_DT, ColumnType::Date),
    col(SLS_DUE_DT, ColumnType::Date),
    col(SLS_SALES, ColumnType::Int),
    col(SLS_QUANTITY, ColumnType::Int),
    col(SLS_PRICE, ColumnType::Int),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

const SILVER_LOC_A101: &[ColumnDef] = &[
    col(CID, ColumnType::Text),
    col(CNTRY, ColumnType::Text),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

const SILVER_CUST_AZ12: &[ColumnDef] = &[
    col(CID, ColumnType::Text),
    col(BDATE, ColumnType::Date),
    col(GEN, ColumnType::Text),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

const SILVER_PX_CAT_G1V2: &[ColumnDef] = &[
    col(ID, ColumnType::Text),
    col(CAT, ColumnType::Text),
    col(SUBCAT, ColumnType::Text),
    col(MAINTENANCE, ColumnType::Text),
    col(DWH_CREATE_DATE, ColumnType::DateTime),
];

impl TableKind {
    /// All source tables in their fixed load order.
    pub const ALL: [TableKind; 6] = [
        Self::CrmCustInfo,
        Self::CrmPrdInfo,
        Self::CrmSalesDetails,
        Self::ErpLocA101,
        Self::ErpCustAz12,
        Self::ErpPxCatG1v2,
    ];

    /// Unqualified table name, identical in bronze and silver.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "crm_cust_info",
            Self::CrmPrdInfo => "crm_prd_info",
            Self::CrmSalesDetails => "crm_sales_details",
            Self::ErpLocA101 => "erp_loc_a101",
            Self::ErpCustAz12 => "erp_cust_az12",
            Self::ErpPxCatG1v2 => "erp_px_cat_g1v2",
        }
    }

    pub const fn source_system(self) -> SourceSystem {
        match self {
            Self::CrmCustInfo | Self::CrmPrdInfo | Self::CrmSalesDetails => SourceSystem::Crm,
            Self::ErpLocA101 | Self::ErpCustAz12 | Self::ErpPxCatG1v2 => SourceSystem::Erp,
        }
    }

    /// Human-readable description of the table contents.
    pub const fn description(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "Customer master",
            Self::CrmPrdInfo => "Product master",
            Self::CrmSalesDetails => "Sales order lines",
            Self::ErpLocA101 => "Customer location",
            Self::ErpCustAz12 => "Customer demographics",
            Self::ErpPxCatG1v2 => "Product category mapping",
        }
    }

    /// Source extract path relative to the source root.
    pub const fn default_source_file(self) -> &'static str {
        match self {
            Self::CrmCustInfo => "source_crm/cust_info.csv",
            Self::CrmPrdInfo => "source_crm/prd_info.csv",
            Self::CrmSalesDetails => "source_crm/sales_details.csv",
            Self::ErpLocA101 => "source_erp/LOC_A101.csv",
            Self::ErpCustAz12 => "source_erp/CUST_AZ12.csv",
            Self::ErpPxCatG1v2 => "source_erp/PX_CAT_G1V2.csv",
        }
    }

    /// Column set of the bronze (raw) table.
    pub const fn raw_columns(self) -> &'static [ColumnDef] {
        match self {
            Self::CrmCustInfo => RAW_CUST_INFO,
            Self::CrmPrdInfo => RAW_PRD_INFO,
            Self::CrmSalesDetails => RAW_SALES_DETAILS,
            Self::ErpLocA101 => RAW_LOC_A101,
            Self::ErpCustAz12 => RAW_CUST_AZ12,
            Self::ErpPxCatG1v2 => RAW_PX_CAT_G1V2,
        }
    }

    /// Column set of the silver (standardized) table, audit column last.
    pub const fn standardized_columns(self) -> &'static [ColumnDef] {
        match self {
            Self::CrmCustInfo => SILVER_CUST_INFO,
            Self::CrmPrdInfo => SILVER_PRD_INFO,
            Self::CrmSalesDetails => SILVER_SALES_DETAILS,
            Self::ErpLocA101 => SILVER_LOC_A101,
            Self::ErpCustAz12 => SILVER_CUST_AZ12,
            Self::ErpPxCatG1v2 => SILVER_PX_CAT_G1V2,
        }
    }

    /// Columns of this table in the given layer. Gold has no source tables.
    pub const fn columns(self, layer: Layer) -> &'static [ColumnDef] {
        match layer {
            Layer::Bronze => self.raw_columns(),
            Layer::Silver | Layer::Gold => self.standardized_columns(),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Star schema projections in the gold layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldView {
    DimCustomers,
    DimProducts,
    FactSales,
}

const DIM_CUSTOMERS: &[ColumnDef] = &[
    col(CUSTOMER_KEY, ColumnType::Int),
    col(CUSTOMER_ID, ColumnType::Int),
    col(CUSTOMER_NUMBER, ColumnType::Text),
    col(FIRST_NAME, ColumnType::Text),
    col(LAST_NAME, ColumnType::Text),
    col(COUNTRY, ColumnType::Text),
    col(MARITAL_STATUS, ColumnType::Text),
    col(GENDER, ColumnType::Text),
    col(BIRTHDATE, ColumnType::Date),
    col(CREATE_DATE, ColumnType::Date),
];

const DIM_PRODUCTS: &[ColumnDef] = &[
    col(PRODUCT_KEY, ColumnType::Int),
    col(PRODUCT_ID, ColumnType::Int),
    col(PRODUCT_NUMBER, ColumnType::Text),
    col(PRODUCT_NAME, ColumnType::Text),
    col(CATEGORY_ID, ColumnType::Text),
    col(CATEGORY, ColumnType::Text),
    col(SUBCATEGORY, ColumnType::Text),
    col(MAINTENANCE, ColumnType::Text),
    col(COST, ColumnType::Int),
    col(PRODUCT_LINE, ColumnType::Text),
    col(START_DATE, ColumnType::Date),
];

const FACT_SALES: &[ColumnDef] = &[
    col(ORDER_NUMBER, ColumnType::Text),
    col(PRODUCT_KEY, ColumnType::Int),
    col(CUSTOMER_KEY, ColumnType::Int),
    col(ORDER_DATE, ColumnType::Date),
    col(SHIPPING_DATE, ColumnType::Date),
    col(DUE_DATE, ColumnType::Date),
    col(SALES_AMOUNT, ColumnType::Int),
    col(QUANTITY, ColumnType::Int),
    col(PRICE, ColumnType::Int),
];

impl GoldView {
    pub const ALL: [GoldView; 3] = [Self::DimCustomers, Self::DimProducts, Self::FactSales];

    pub const fn view_name(self) -> &'static str {
        match self {
            Self::DimCustomers => "dim_customers",
            Self::DimProducts => "dim_products",
            Self::FactSales => "fact_sales",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::DimCustomers => "Customer dimension",
            Self::DimProducts => "Current product dimension",
            Self::FactSales => "Sales fact",
        }
    }

    pub const fn columns(self) -> &'static [ColumnDef] {
        match self {
            Self::DimCustomers => DIM_CUSTOMERS,
            Self::DimProducts => DIM_PRODUCTS,
            Self::FactSales => FACT_SALES,
        }
    }
}

impl fmt::Display for GoldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.view_name())
    }
}
