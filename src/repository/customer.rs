use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::unicode_lower,
    domain::{
        customer::{Customer, NewCustomer, UpdateCustomer},
        query::{CustomerListQuery, CustomerSortField, SortDirection},
        types::{CustomerEmail, CustomerId},
    },
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{
        CustomerReader, CustomerWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn into_domain(rows: Vec<DbCustomer>) -> RepositoryResult<Vec<Customer>> {
    rows.into_iter()
        .map(|row| Customer::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .find(id.to_string())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_customer_by_email(&self, email: &CustomerEmail) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::email.eq(email.as_str()))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = customers::table.into_boxed::<Sqlite>();

            if let Some(search) = &query.search {
                let pattern = search.like_pattern();
                items = items.filter(
                    unicode_lower(customers::first_name.nullable())
                        .like(pattern.clone())
                        .escape('\\')
                        .or(unicode_lower(customers::last_name.nullable())
                            .like(pattern.clone())
                            .escape('\\'))
                        .or(unicode_lower(customers::email.nullable())
                            .like(pattern.clone())
                            .escape('\\'))
                        .or(unicode_lower(customers::phone)
                            .like(pattern)
                            .escape('\\')),
                );
            }
            items
        };

        // Count before the window is applied.
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let Some(offset) = query.pagination.offset() else {
            return Ok((total, Vec::new()));
        };

        let items = query_builder();
        let items = match (query.sort_field, query.sort_direction) {
            (CustomerSortField::FirstName, SortDirection::Asc) => {
                items.order(customers::first_name.asc())
            }
            (CustomerSortField::FirstName, SortDirection::Desc) => {
                items.order(customers::first_name.desc())
            }
            (CustomerSortField::LastName, SortDirection::Asc) => {
                items.order(customers::last_name.asc())
            }
            (CustomerSortField::LastName, SortDirection::Desc) => {
                items.order(customers::last_name.desc())
            }
            (CustomerSortField::Email, SortDirection::Asc) => items.order(customers::email.asc()),
            (CustomerSortField::Email, SortDirection::Desc) => {
                items.order(customers::email.desc())
            }
            (CustomerSortField::CreatedAt, SortDirection::Asc) => {
                items.order(customers::created_at.asc())
            }
            (CustomerSortField::CreatedAt, SortDirection::Desc) => {
                items.order(customers::created_at.desc())
            }
        };

        let rows = items
            .then_order_by(customers::id.asc())
            .offset(offset)
            .limit(query.pagination.size as i64)
            .load::<DbCustomer>(&mut conn)?;

        Ok((total, into_domain(rows)?))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = new_customer
            .clone()
            .into_customer(CustomerId::new(), Utc::now().naive_utc());

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let taken = customers::table
                .filter(customers::email.eq(customer.email.as_str()))
                .select(customers::id)
                .first::<String>(conn)
                .optional()?;
            if taken.is_some() {
                return Err(RepositoryError::Duplicate(customer.email.to_string()));
            }

            let db_new_customer: DbNewCustomer = (&customer).into();
            let row = diesel::insert_into(customers::table)
                .values(&db_new_customer)
                .get_result::<DbCustomer>(conn)?;

            Ok(Customer::try_from(row)?)
        })
    }

    fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let row = customers::table
                .find(id.to_string())
                .first::<DbCustomer>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let mut customer = Customer::try_from(row)?;
            updates.apply(&mut customer, Utc::now().naive_utc());

            let changeset: DbUpdateCustomer = (&customer).into();
            let row = diesel::update(customers::table.find(id.to_string()))
                .set(&changeset)
                .get_result::<DbCustomer>(conn)?;

            Ok(Customer::try_from(row)?)
        })
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let removed = diesel::delete(customers::table.find(id.to_string())).execute(&mut conn)?;

        if removed == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
