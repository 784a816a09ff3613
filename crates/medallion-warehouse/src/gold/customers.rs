use polars::prelude::DataFrame;

use medallion_ingest::{ColumnValues, build_frame, int_values, text_values};
use medallion_model::columns::{
    BDATE, BIRTHDATE, CID, CNTRY, COUNTRY, CREATE_DATE, CST_CREATE_DATE, CST_FIRSTNAME, CST_GNDR,
    CST_ID, CST_KEY, CST_LASTNAME, CST_MARITAL_STATUS, CUSTOMER_ID, CUSTOMER_KEY,
    CUSTOMER_NUMBER, FIRST_NAME, GEN, GENDER, LAST_NAME, MARITAL_STATUS, NOT_AVAILABLE,
};
use medallion_model::{GoldView, Layer, TableKind};

use crate::error::Result;
use crate::gold::{first_row_by, lookup};
use crate::keys::SurrogateKeys;
use crate::store::Warehouse;

/// Customer dimension: one row per silver customer, ordered by identifier.
///
/// Country comes from the location mapping and birthdate from the
/// demographic record, both matched on the customer number. The CRM gender
/// wins unless it is `n/a`, then the demographic gender is used.
///
/// # Errors
///
/// Returns an error if a silver table is missing or a frame cannot be built.
pub fn dim_customers(warehouse: &Warehouse, keys: &mut SurrogateKeys) -> Result<DataFrame> {
    let customers = warehouse.require(Layer::Silver, TableKind::CrmCustInfo)?;
    let locations = warehouse.require(Layer::Silver, TableKind::ErpLocA101)?;
    let demographics = warehouse.require(Layer::Silver, TableKind::ErpCustAz12)?;

    let ids = int_values(customers, CST_ID)?;
    let mut order: Vec<usize> = (0..ids.len()).collect();
    order.sort_by_key(|&row| ids[row]);

    let numbers = text_values(customers, CST_KEY)?;
    let first_names = text_values(customers, CST_FIRSTNAME)?;
    let last_names = text_values(customers, CST_LASTNAME)?;
    let marital = text_values(customers, CST_MARITAL_STATUS)?;
    let genders = text_values(customers, CST_GNDR)?;
    let created = text_values(customers, CST_CREATE_DATE)?;

    let location_ids = text_values(locations, CID)?;
    let location_rows = first_row_by(&location_ids);
    let countries = text_values(locations, CNTRY)?;

    let demographic_ids = text_values(demographics, CID)?;
    let demographic_rows = first_row_by(&demographic_ids);
    let birthdates = text_values(demographics, BDATE)?;
    let demographic_genders = text_values(demographics, GEN)?;

    let mut country = Vec::with_capacity(order.len());
    let mut gender = Vec::with_capacity(order.len());
    let mut birthdate = Vec::with_capacity(order.len());
    for &row in &order {
        let number = numbers[row].as_ref();
        let location = number.and_then(|n| location_rows.get(n).copied());
        let demographic = number.and_then(|n| demographic_rows.get(n).copied());

        country.push(lookup(&countries, location));
        birthdate.push(lookup(&birthdates, demographic));
        gender.push(Some(match genders[row].as_deref() {
            Some(crm) if crm != NOT_AVAILABLE => crm.to_string(),
            _ => lookup(&demographic_genders, demographic)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }));
    }

    let business_keys: Vec<Option<String>> = order
        .iter()
        .map(|&row| ids[row].map(|id| id.to_string()))
        .collect();
    let surrogates = keys.assign(GoldView::DimCustomers, &business_keys);
    let pick = |values: &[Option<String>]| -> Vec<Option<String>> {
        order.iter().map(|&row| values[row].clone()).collect()
    };

    Ok(build_frame(vec![
        (CUSTOMER_KEY, ColumnValues::Int(surrogates)),
        (
            CUSTOMER_ID,
            ColumnValues::Int(order.iter().map(|&row| ids[row]).collect()),
        ),
        (CUSTOMER_NUMBER, ColumnValues::Text(pick(&numbers))),
        (FIRST_NAME, ColumnValues::Text(pick(&first_names))),
        (LAST_NAME, ColumnValues::Text(pick(&last_names))),
        (COUNTRY, ColumnValues::Text(country)),
        (MARITAL_STATUS, ColumnValues::Text(pick(&marital))),
        (GENDER, ColumnValues::Text(gender)),
        (BIRTHDATE, ColumnValues::Text(birthdate)),
        (CREATE_DATE, ColumnValues::Text(pick(&created))),
    ])?)
}
