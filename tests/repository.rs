use std::thread;
use std::time::Duration;

use customer_directory::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use customer_directory::domain::query::{
    CustomerListQuery, CustomerSortField, Pagination, SortDirection,
};
use customer_directory::domain::search::CustomerSearch;
use customer_directory::domain::types::{CustomerEmail, CustomerId, CustomerName, PhoneNumber};
use customer_directory::repository::errors::RepositoryError;
use customer_directory::repository::{CustomerReader, CustomerWriter};

mod common;

fn new_customer(first: &str, last: &str, email: &str, phone: Option<&str>) -> NewCustomer {
    NewCustomer::new(
        CustomerName::new(first).unwrap(),
        CustomerName::new(last).unwrap(),
        CustomerEmail::new(email).unwrap(),
        phone.map(|p| PhoneNumber::new(p).unwrap()),
    )
}

fn first_page(size: usize) -> CustomerListQuery {
    CustomerListQuery::new(Pagination { page: 0, size })
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = test_db.repo();

    let created = repo
        .create_customer(&new_customer("Jo", "Lee", "jo@x.com", Some("555-0100")))
        .unwrap();
    assert_eq!(created.status, CustomerStatus::Active);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get_customer_by_id(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    let by_email = repo
        .get_customer_by_email(&CustomerEmail::new("jo@x.com").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    let updates = UpdateCustomer::new(
        CustomerName::new("Jon").unwrap(),
        CustomerName::new("Lee").unwrap(),
        None,
        CustomerStatus::Inactive,
    );
    let updated = repo.update_customer(created.id, &updates).unwrap();
    assert_eq!(updated.first_name.as_str(), "Jon");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.status, CustomerStatus::Inactive);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    repo.delete_customer(created.id).unwrap();
    assert!(repo.get_customer_by_id(created.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_customer(created.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_missing_customer() {
    let test_db = common::TestDb::new("test_missing_customer.db");
    let repo = test_db.repo();
    let id = CustomerId::new();

    assert!(repo.get_customer_by_id(id).unwrap().is_none());

    let updates = UpdateCustomer::new(
        CustomerName::new("Jon").unwrap(),
        CustomerName::new("Lee").unwrap(),
        None,
        CustomerStatus::Active,
    );
    assert!(matches!(
        repo.update_customer(id, &updates),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_email_is_rejected.db");
    let repo = test_db.repo();

    repo.create_customer(&new_customer("Jo", "Lee", "jo@x.com", None))
        .unwrap();
    let second = repo.create_customer(&new_customer("Al", "Kim", "jo@x.com", None));

    assert!(matches!(second, Err(RepositoryError::Duplicate(_))));
    let (total, _) = repo.list_customers(first_page(10)).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_concurrent_creates_with_same_email() {
    let test_db = common::TestDb::new("test_concurrent_creates_with_same_email.db");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let repo = test_db.repo();
            thread::spawn(move || {
                repo.create_customer(&new_customer(&format!("N{i}"), "Lee", "race@x.com", None))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RepositoryError::Duplicate(_)))
    );
}

#[test]
fn test_list_paginates_and_counts() {
    let test_db = common::TestDb::new("test_list_paginates_and_counts.db");
    let repo = test_db.repo();

    for i in 0..25 {
        repo.create_customer(&new_customer(
            &format!("First{i:02}"),
            "Lee",
            &format!("user{i:02}@x.com"),
            None,
        ))
        .unwrap();
    }

    let query = CustomerListQuery::new(Pagination { page: 2, size: 10 })
        .sort(CustomerSortField::Email, SortDirection::Asc);
    let (total, items) = repo.list_customers(query).unwrap();
    assert_eq!(total, 25);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].email.as_str(), "user20@x.com");

    let beyond = CustomerListQuery::new(Pagination { page: 9, size: 10 });
    let (total, items) = repo.list_customers(beyond).unwrap();
    assert_eq!(total, 25);
    assert!(items.is_empty());
}

#[test]
fn test_list_sorts_by_each_field() {
    let test_db = common::TestDb::new("test_list_sorts_by_each_field.db");
    let repo = test_db.repo();

    for (first, last, email) in [
        ("Cid", "Avery", "b@x.com"),
        ("Ann", "Chen", "c@x.com"),
        ("Bob", "Baker", "a@x.com"),
    ] {
        repo.create_customer(&new_customer(first, last, email, None))
            .unwrap();
        // Distinct creation instants.
        thread::sleep(Duration::from_millis(5));
    }

    let firsts = |field, direction| {
        let (_, items) = repo
            .list_customers(first_page(10).sort(field, direction))
            .unwrap();
        items
            .into_iter()
            .map(|c| c.first_name.into_inner())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        firsts(CustomerSortField::FirstName, SortDirection::Asc),
        ["Ann", "Bob", "Cid"]
    );
    assert_eq!(
        firsts(CustomerSortField::FirstName, SortDirection::Desc),
        ["Cid", "Bob", "Ann"]
    );
    assert_eq!(
        firsts(CustomerSortField::LastName, SortDirection::Asc),
        ["Cid", "Bob", "Ann"]
    );
    assert_eq!(
        firsts(CustomerSortField::Email, SortDirection::Asc),
        ["Bob", "Cid", "Ann"]
    );
    assert_eq!(
        firsts(CustomerSortField::CreatedAt, SortDirection::Asc),
        ["Cid", "Ann", "Bob"]
    );
    assert_eq!(
        firsts(CustomerSortField::CreatedAt, SortDirection::Desc),
        ["Bob", "Ann", "Cid"]
    );
}

#[test]
fn test_equal_sort_keys_page_without_overlap() {
    let test_db = common::TestDb::new("test_equal_sort_keys_page_without_overlap.db");
    let repo = test_db.repo();

    for i in 0..7 {
        repo.create_customer(&new_customer("Same", "Name", &format!("s{i}@x.com"), None))
            .unwrap();
    }

    let mut seen = Vec::new();
    for page in 0..3 {
        let query = CustomerListQuery::new(Pagination { page, size: 3 })
            .sort(CustomerSortField::LastName, SortDirection::Asc);
        let (_, items) = repo.list_customers(query).unwrap();
        seen.extend(items.into_iter().map(|c| c.id));
    }

    let mut unique = seen.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(seen.len(), 7);
    assert_eq!(unique.len(), 7);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let test_db = common::TestDb::new("test_search_is_case_insensitive_across_fields.db");
    let repo = test_db.repo();

    repo.create_customer(&new_customer("Alice", "Smith", "alice@x.com", None))
        .unwrap();
    repo.create_customer(&new_customer("Bob", "Jones", "bob@x.com", Some("+1 555 0199")))
        .unwrap();
    repo.create_customer(&new_customer("Carol", "Alison", "carol@x.com", None))
        .unwrap();

    let search = |term: &str| {
        let query = first_page(10)
            .sort(CustomerSortField::FirstName, SortDirection::Asc)
            .search(CustomerSearch::from_raw(Some(term)));
        let (total, items) = repo.list_customers(query).unwrap();
        let names: Vec<_> = items
            .into_iter()
            .map(|c| c.first_name.into_inner())
            .collect();
        (total, names)
    };

    assert_eq!(search("ALI"), (2, vec!["Alice".to_string(), "Carol".to_string()]));
    assert_eq!(search("jones"), (1, vec!["Bob".to_string()]));
    assert_eq!(search("0199"), (1, vec!["Bob".to_string()]));
    assert_eq!(search("CAROL@X"), (1, vec!["Carol".to_string()]));
    assert_eq!(search("nobody"), (0, Vec::<String>::new()));
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_treats_wildcards_literally.db");
    let repo = test_db.repo();

    repo.create_customer(&new_customer("Ann", "Lee", "ann@x.com", None))
        .unwrap();
    repo.create_customer(&new_customer("Per_cent", "Lee", "pc@x.com", None))
        .unwrap();

    for (term, expected) in [("%", 0), ("_", 1), ("r_c", 1)] {
        let query = first_page(10).search(CustomerSearch::from_raw(Some(term)));
        let (total, _) = repo.list_customers(query).unwrap();
        assert_eq!(total, expected, "{term}");
    }
}

#[test]
fn test_page_beyond_addressable_offset_is_empty() {
    let test_db = common::TestDb::new("test_page_beyond_addressable_offset_is_empty.db");
    let repo = test_db.repo();

    repo.create_customer(&new_customer("Jo", "Lee", "jo@x.com", None))
        .unwrap();

    let query = CustomerListQuery::new(Pagination {
        page: 184_467_440_737_095_516,
        size: 100,
    });
    let (total, items) = repo.list_customers(query).unwrap();

    assert_eq!(total, 1);
    assert!(items.is_empty());
}

#[test]
fn test_search_folds_non_ascii_case() {
    let test_db = common::TestDb::new("test_search_folds_non_ascii_case.db");
    let repo = test_db.repo();

    repo.create_customer(&new_customer("Émile", "Zola", "emile@x.com", None))
        .unwrap();
    repo.create_customer(&new_customer("Ann", "ÖSTERBERG", "ann@x.com", None))
        .unwrap();

    for (term, expected) in [("émile", "Émile"), ("ÉMILE", "Émile"), ("österberg", "Ann")] {
        let query = first_page(10).search(CustomerSearch::from_raw(Some(term)));
        let (total, items) = repo.list_customers(query).unwrap();
        assert_eq!(total, 1, "{term}");
        assert_eq!(items[0].first_name.as_str(), expected, "{term}");
    }
}
