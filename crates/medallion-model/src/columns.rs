//! Column names used across the bronze, silver and gold layers.

// crm_cust_info
pub const CST_ID: &str = "cst_id";
pub const CST_KEY: &str = "cst_key";
pub const CST_FIRSTNAME: &str = "cst_firstname";
pub const CST_LASTNAME: &str = "cst_lastname";
pub const CST_MARITAL_STATUS: &str = "cst_marital_status";
pub const CST_GNDR: &str = "cst_gndr";
pub const CST_CREATE_DATE: &str = "cst_create_date";

// crm_prd_info
pub const PRD_ID: &str = "prd_id";
pub const CAT_ID: &str = "cat_id";
pub const PRD_KEY: &str = "prd_key";
pub const PRD_NM: &str = "prd_nm";
pub const PRD_COST: &str = "prd_cost";
pub const PRD_LINE: &str = "prd_line";
pub const PRD_START_DT: &str = "prd_start_dt";
pub const PRD_END_DT: &str = "prd_end_dt";

// crm_sales_details
pub const SLS_ORD_NUM: &str = "sls_ord_num";
pub const SLS_PRD_KEY: &str = "sls_prd_key";
pub const SLS_CUST_ID: &str = "sls_cust_id";
pub const SLS_ORDER_DT: &str = "sls_order_dt";
pub const SLS_SHIP_DT: &str = "sls_ship_dt";
pub const SLS_DUE_DT: &str = "sls_due_dt";
pub const SLS_SALES: &str = "sls_sales";
pub const SLS_QUANTITY: &str = "sls_quantity";
pub const SLS_PRICE: &str = "sls_price";

// erp_loc_a101, erp_cust_az12
pub const CID: &str = "cid";
pub const CNTRY: &str = "cntry";
pub const BDATE: &str = "bdate";
pub const GEN: &str = "gen";

// erp_px_cat_g1v2
pub const ID: &str = "id";
pub const CAT: &str = "cat";
pub const SUBCAT: &str = "subcat";
pub const MAINTENANCE: &str = "maintenance";

/// Audit column stamped on every silver table at write time.
pub const DWH_CREATE_DATE: &str = "dwh_create_date";

// gold.dim_customers
pub const CUSTOMER_KEY: &str = "customer_key";
pub const CUSTOMER_ID: &str = "customer_id";
pub const CUSTOMER_NUMBER: &str = "customer_number";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const COUNTRY: &str = "country";
pub const MARITAL_STATUS: &str = "marital_status";
pub const GENDER: &str = "gender";
pub const BIRTHDATE: &str = "birthdate";
pub const CREATE_DATE: &str = "create_date";

// gold.dim_products
pub const PRODUCT_KEY: &str = "product_key";
pub const PRODUCT_ID: &str = "product_id";
pub const PRODUCT_NUMBER: &str = "product_number";
pub const PRODUCT_NAME: &str = "product_name";
pub const CATEGORY_ID: &str = "category_id";
pub const CATEGORY: &str = "category";
pub const SUBCATEGORY: &str = "subcategory";
pub const COST: &str = "cost";
pub const PRODUCT_LINE: &str = "product_line";
pub const START_DATE: &str = "start_date";

// gold.fact_sales
pub const ORDER_NUMBER: &str = "order_number";
pub const ORDER_DATE: &str = "order_date";
pub const SHIPPING_DATE: &str = "shipping_date";
pub const DUE_DATE: &str = "due_date";
pub const SALES_AMOUNT: &str = "sales_amount";
pub const QUANTITY: &str = "quantity";
pub const PRICE: &str = "price";

/// Label used for unmapped or missing categorical values.
pub const NOT_AVAILABLE: &str = "n/a";
