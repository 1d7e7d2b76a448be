//! Facade tests against an in-memory recording store

use crate::errors::DaoError;
use crate::generic_dao::Dao;
use crate::page::Page;
use crate::query_builder::{Arg, Condition, Pagination, Query, SelectStatement};
use crate::traits::{DataStore, Row, TableMetadata};
use async_trait::async_trait;
use config::DaoConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: i64,
    name: String,
    age: i32,
    active: bool,
}

impl TableMetadata for User {
    fn table_name() -> &'static str {
        "users"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    uuid: String,
    balance: i64,
}

impl TableMetadata for Account {
    fn table_name() -> &'static str {
        "accounts"
    }

    fn primary_key_field() -> Option<&'static str> {
        Some("uuid")
    }
}

#[derive(Debug, PartialEq, Deserialize)]
struct UserName {
    name: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Insert { table: String, rows: Vec<Row> },
    Update { table: String, values: Row, condition: Condition },
    Delete { table: String, condition: Condition },
    Select { table: String, statement: SelectStatement },
    Count { table: String, statement: SelectStatement },
}

/// Records every call and answers from scripted responses
#[derive(Default)]
struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    selects: Mutex<VecDeque<Vec<Row>>>,
    count: Mutex<Option<Result<i64, String>>>,
    fail_insert_after: Option<usize>,
    affected: u64,
}

impl RecordingStore {
    fn with_rows(rows: Vec<Value>) -> Self {
        let store = Self::default();
        store.push_rows(rows);
        store
    }

    fn push_rows(&self, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(row) => row,
                other => panic!("row must be an object: {other}"),
            })
            .collect();
        self.selects.lock().unwrap().push_back(rows);
    }

    fn set_count(&self, count: Result<i64, String>) {
        *self.count.lock().unwrap() = Some(count);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DataStore for RecordingStore {
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<u64, DaoError> {
        let inserted = rows.len() as u64;
        self.record(Call::Insert {
            table: table.to_string(),
            rows,
        });
        let inserts = self
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Insert { .. }))
            .count();
        match self.fail_insert_after {
            Some(limit) if inserts > limit => Err(DaoError::Store("duplicate key".to_string())),
            _ => Ok(inserted),
        }
    }

    async fn update(
        &self,
        table: &str,
        values: Row,
        condition: Condition,
    ) -> Result<u64, DaoError> {
        self.record(Call::Update {
            table: table.to_string(),
            values,
            condition,
        });
        Ok(self.affected)
    }

    async fn delete(&self, table: &str, condition: Condition) -> Result<u64, DaoError> {
        self.record(Call::Delete {
            table: table.to_string(),
            condition,
        });
        Ok(self.affected)
    }

    async fn select(
        &self,
        table: &str,
        statement: SelectStatement,
    ) -> Result<Vec<Row>, DaoError> {
        self.record(Call::Select {
            table: table.to_string(),
            statement,
        });
        Ok(self.selects.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn count(&self, table: &str, statement: SelectStatement) -> Result<i64, DaoError> {
        self.record(Call::Count {
            table: table.to_string(),
            statement,
        });
        match self.count.lock().unwrap().clone() {
            Some(Ok(total)) => Ok(total),
            Some(Err(message)) => Err(DaoError::Store(message)),
            None => Ok(0),
        }
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        age: 30,
        active: true,
    }
}

fn user_row(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "age": 30, "active": true })
}

// ========================================
// Inserts
// ========================================

#[tokio::test]
async fn test_insert_single_row() {
    let dao = Dao::new(RecordingStore::default());

    let affected = dao.insert(&user(1, "ann")).await.unwrap();
    assert_eq!(affected, 1);

    let calls = dao.store().calls();
    assert_eq!(calls.len(), 1);
    let Call::Insert { table, rows } = &calls[0] else {
        panic!("expected insert, got {:?}", calls[0]);
    };
    assert_eq!(table, "users");
    assert_eq!(Value::Object(rows[0].clone()), user_row(1, "ann"));
}

#[tokio::test]
async fn test_insert_batch_empty_is_noop() {
    let dao = Dao::new(RecordingStore::default());

    assert_eq!(dao.insert_batch::<User>(&[]).await.unwrap(), 0);
    assert_eq!(dao.insert_batch_size::<User>(&[], 3).await.unwrap(), 0);
    assert!(dao.store().calls().is_empty());
}

#[tokio::test]
async fn test_insert_batch_chunks() {
    let dao = Dao::new(RecordingStore::default());
    let users: Vec<User> = (1..=7).map(|i| user(i, "u")).collect();

    let affected = dao.insert_batch_size(&users, 3).await.unwrap();
    assert_eq!(affected, 7);

    let sizes: Vec<usize> = dao
        .store()
        .calls()
        .iter()
        .map(|call| match call {
            Call::Insert { rows, .. } => rows.len(),
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}

#[tokio::test]
async fn test_insert_batch_zero_size_uses_configured_default() {
    let dao = Dao::with_config(
        RecordingStore::default(),
        DaoConfig::new(4, 10, "id".to_string()),
    );
    let users: Vec<User> = (1..=9).map(|i| user(i, "u")).collect();

    dao.insert_batch_size(&users, 0).await.unwrap();
    assert_eq!(dao.store().calls().len(), 3);

    let default_dao = Dao::new(RecordingStore::default());
    default_dao.insert_batch(&users).await.unwrap();
    assert_eq!(default_dao.store().calls().len(), 1);
}

#[tokio::test]
async fn test_insert_batch_stops_at_first_failing_chunk() {
    let store = RecordingStore {
        fail_insert_after: Some(1),
        ..Default::default()
    };
    let dao = Dao::new(store);
    let users: Vec<User> = (1..=6).map(|i| user(i, "u")).collect();

    let err = dao.insert_batch_size(&users, 2).await.unwrap_err();
    assert!(matches!(err, DaoError::Store(ref message) if message == "duplicate key"));
    assert_eq!(dao.store().calls().len(), 2);
}

// ========================================
// Deletes
// ========================================

#[tokio::test]
async fn test_delete_by_id_default_and_explicit_column() {
    let dao = Dao::new(RecordingStore {
        affected: 1,
        ..Default::default()
    });

    assert_eq!(dao.delete_by_id::<User, _>(5i64, None).await.unwrap(), 1);
    dao.delete_by_id::<User, _>("abc", Some("code")).await.unwrap();
    dao.delete_by_id::<Account, _>("acc-1", None).await.unwrap();

    let conditions: Vec<Condition> = dao
        .store()
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::Delete { condition, .. } => condition,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();

    assert_eq!(conditions[0], Condition::new("id = ?", vec![json!(5)]));
    assert_eq!(conditions[1], Condition::new("code = ?", vec![json!("abc")]));
    assert_eq!(conditions[2], Condition::new("uuid = ?", vec![json!("acc-1")]));
}

#[tokio::test]
async fn test_uuid_keys_bind_as_uuid() {
    let dao = Dao::new(RecordingStore::default());
    let id = Uuid::new_v4();

    dao.delete_by_id::<Account, _>(id, None).await.unwrap();
    dao.delete_by_id::<Account, _>(id.to_string(), None).await.unwrap();

    let calls = dao.store().calls();
    let Call::Delete { condition, .. } = &calls[0] else {
        panic!("expected delete, got {:?}", calls[0]);
    };
    assert_eq!(condition.args, vec![Arg::Uuid(id)]);

    let Call::Delete { condition, .. } = &calls[1] else {
        panic!("expected delete, got {:?}", calls[1]);
    };
    assert_eq!(condition.args, vec![Arg::Value(json!(id.to_string()))]);
}

#[tokio::test]
async fn test_configured_primary_key() {
    let dao = Dao::with_config(
        RecordingStore::default(),
        DaoConfig::new(1000, 10, "user_id".to_string()),
    );

    dao.delete_by_id::<User, _>(9i32, None).await.unwrap();
    let calls = dao.store().calls();
    assert!(matches!(
        &calls[0],
        Call::Delete { condition, .. } if condition.sql == "user_id = ?"
    ));
}

#[tokio::test]
async fn test_delete_by_ids() {
    let dao = Dao::new(RecordingStore::default());

    assert_eq!(dao.delete_by_ids::<User, i64>(&[], None).await.unwrap(), 0);
    assert!(dao.store().calls().is_empty());

    dao.delete_by_ids::<User, _>(&[1i64, 2, 3], None).await.unwrap();
    let calls = dao.store().calls();
    assert_eq!(
        calls,
        vec![Call::Delete {
            table: "users".to_string(),
            condition: Condition::new(
                "id IN ?",
                vec![Arg::List(vec![1i64.into(), 2i64.into(), 3i64.into()])]
            ),
        }]
    );
}

#[tokio::test]
async fn test_delete_by_query() {
    let dao = Dao::new(RecordingStore::default());
    let query = Query::<User>::new().lt("age", 18).or().eq("active", false);

    dao.delete(&query).await.unwrap();
    assert_eq!(
        dao.store().calls(),
        vec![Call::Delete {
            table: "users".to_string(),
            condition: Condition::new("age < ? OR active = ?", vec![json!(18), json!(false)]),
        }]
    );
}

#[tokio::test]
async fn test_delete_without_condition_rejected() {
    let dao = Dao::new(RecordingStore::default());

    let err = dao.delete(&Query::<User>::new()).await.unwrap_err();
    assert!(matches!(err, DaoError::MissingWhereClause { .. }));
    assert!(dao.store().calls().is_empty());
}

// ========================================
// Updates
// ========================================

#[tokio::test]
async fn test_update_by_id_skips_default_fields() {
    let dao = Dao::new(RecordingStore {
        affected: 1,
        ..Default::default()
    });
    let patch = User {
        id: 0,
        name: "bea".to_string(),
        age: 0,
        active: false,
    };

    assert_eq!(dao.update_by_id(&patch, 12i64, None).await.unwrap(), 1);

    let calls = dao.store().calls();
    let Call::Update { values, condition, .. } = &calls[0] else {
        panic!("expected update, got {:?}", calls[0]);
    };
    assert_eq!(Value::Object(values.clone()), json!({ "name": "bea" }));
    assert_eq!(condition, &Condition::new("id = ?", vec![json!(12)]));
}

#[tokio::test]
async fn test_update_by_id_with_nothing_to_write() {
    let dao = Dao::new(RecordingStore::default());
    let empty = User {
        id: 3,
        name: String::new(),
        age: 0,
        active: false,
    };

    assert_eq!(dao.update_by_id(&empty, 3i64, None).await.unwrap(), 0);
    assert!(dao.store().calls().is_empty());
}

#[tokio::test]
async fn test_update_by_query_writes_zero_values() {
    let dao = Dao::new(RecordingStore::default());
    let query = Query::<User>::new()
        .set("age", 0)
        .set("active", false)
        .eq("name", "ann");

    dao.update(&query).await.unwrap();

    let calls = dao.store().calls();
    let Call::Update { values, condition, .. } = &calls[0] else {
        panic!("expected update, got {:?}", calls[0]);
    };
    assert_eq!(Value::Object(values.clone()), json!({ "age": 0, "active": false }));
    assert_eq!(condition, &Condition::new("name = ?", vec![json!("ann")]));
}

#[tokio::test]
async fn test_update_guards() {
    let dao = Dao::new(RecordingStore::default());

    let no_values = Query::<User>::new().eq("id", 1);
    assert_eq!(dao.update(&no_values).await.unwrap(), 0);

    let no_condition = Query::<User>::new().set("age", 1);
    let err = dao.update(&no_condition).await.unwrap_err();
    assert!(matches!(err, DaoError::MissingWhereClause { .. }));

    assert!(dao.store().calls().is_empty());
}

// ========================================
// Reads
// ========================================

#[tokio::test]
async fn test_select_by_id_found() {
    let dao = Dao::new(RecordingStore::with_rows(vec![user_row(4, "dan")]));

    let found: Option<User> = dao.select_by_id(4i64).await.unwrap();
    assert_eq!(found, Some(user(4, "dan")));

    let calls = dao.store().calls();
    let Call::Select { statement, .. } = &calls[0] else {
        panic!("expected select, got {:?}", calls[0]);
    };
    assert_eq!(statement.condition, Condition::new("id = ?", vec![json!(4)]));
    assert_eq!(statement.pagination, Some(Pagination::new().with_limit(1)));
}

#[tokio::test]
async fn test_select_by_id_missing_is_none() {
    let dao = Dao::new(RecordingStore::default());

    let found: Option<User> = dao.select_by_id(404i64).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn test_select_by_ids() {
    let dao = Dao::new(RecordingStore::with_rows(vec![
        user_row(1, "a"),
        user_row(2, "b"),
    ]));

    let empty: Vec<User> = dao.select_by_ids::<User, i64>(&[], None).await.unwrap();
    assert!(empty.is_empty());
    assert!(dao.store().calls().is_empty());

    let users: Vec<User> = dao.select_by_ids(&[1i64, 2], None).await.unwrap();
    assert_eq!(users, vec![user(1, "a"), user(2, "b")]);
}

#[tokio::test]
async fn test_select_one_and_list() {
    let store = RecordingStore::with_rows(vec![user_row(1, "a")]);
    store.push_rows(vec![user_row(1, "a"), user_row(2, "b")]);
    let dao = Dao::new(store);
    let query = Query::<User>::new().eq("active", true).order_by_asc(["id"]);

    let first = dao.select_one(&query).await.unwrap();
    assert_eq!(first, Some(user(1, "a")));

    let all = dao.select_list(&query).await.unwrap();
    assert_eq!(all.len(), 2);

    let calls = dao.store().calls();
    let Call::Select { statement, .. } = &calls[1] else {
        panic!("expected select, got {:?}", calls[1]);
    };
    assert_eq!(statement.order.as_deref(), Some("id ASC"));
    assert_eq!(statement.pagination, None);
}

#[tokio::test]
async fn test_select_list_model_projection() {
    let dao = Dao::new(RecordingStore::with_rows(vec![
        json!({ "name": "a" }),
        json!({ "name": "b" }),
    ]));
    let query = Query::<User>::new().select(["name"]).gt("age", 20);

    let names: Vec<UserName> = dao.select_list_model(&query).await.unwrap();
    assert_eq!(
        names,
        vec![
            UserName {
                name: "a".to_string()
            },
            UserName {
                name: "b".to_string()
            }
        ]
    );
}

#[tokio::test]
async fn test_select_list_reports_mapping_errors() {
    let dao = Dao::new(RecordingStore::with_rows(vec![json!({ "id": "not-a-number" })]));

    let err = dao.select_list(&Query::<User>::new()).await.unwrap_err();
    assert!(matches!(err, DaoError::Serialization(_)));
}

#[tokio::test]
async fn test_select_count_ignores_order() {
    let store = RecordingStore::default();
    store.set_count(Ok(42));
    let dao = Dao::new(store);
    let query = Query::<User>::new().eq("active", true).order_by_desc(["age"]);

    assert_eq!(dao.select_count(&query).await.unwrap(), 42);

    let calls = dao.store().calls();
    let Call::Count { statement, .. } = &calls[0] else {
        panic!("expected count, got {:?}", calls[0]);
    };
    assert_eq!(statement.order, None);
    assert_eq!(statement.pagination, None);
}

// ========================================
// Pagination
// ========================================

#[tokio::test]
async fn test_select_page_last_page() {
    let store = RecordingStore::with_rows(vec![
        user_row(21, "x"),
        user_row(22, "y"),
        user_row(23, "z"),
    ]);
    store.set_count(Ok(23));
    let dao = Dao::new(store);
    let query = Query::<User>::new().eq("active", true);

    let mut page = Page::new(3, 10);
    dao.select_page(&mut page, &query).await.unwrap();

    assert_eq!(page.total, 23);
    assert_eq!(page.records.len(), 3);
    assert_eq!(page.current, 3);

    let calls = dao.store().calls();
    assert_eq!(calls.len(), 2);
    let (Call::Count { statement: count, .. }, Call::Select { statement: data, .. }) =
        (&calls[0], &calls[1])
    else {
        panic!("expected count then select, got {calls:?}");
    };
    assert_eq!(count.condition, data.condition);
    assert_eq!(count.pagination, None);
    assert_eq!(data.pagination, Some(Pagination::for_page(3, 10)));
    assert_eq!(
        data.pagination,
        Some(Pagination {
            limit: Some(10),
            offset: Some(20)
        })
    );
}

#[tokio::test]
async fn test_select_page_count_failure_short_circuits() {
    let store = RecordingStore::with_rows(vec![user_row(1, "a")]);
    store.set_count(Err("connection reset".to_string()));
    let dao = Dao::new(store);

    let mut page = Page::new(1, 10);
    page.total = -1;
    let err = dao
        .select_page(&mut page, &Query::<User>::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DaoError::Store(ref message) if message == "connection reset"));
    assert_eq!(page.total, -1);
    assert!(page.records.is_empty());

    let calls = dao.store().calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Count { .. }));
}

#[tokio::test]
async fn test_select_page_normalizes_invalid_page() {
    let store = RecordingStore::default();
    store.set_count(Ok(5));
    let dao = Dao::new(store);

    let mut page: Page<User> = Page::new(-3, 0);
    dao.select_page(&mut page, &Query::new()).await.unwrap();

    let calls = dao.store().calls();
    let Call::Select { statement, .. } = &calls[1] else {
        panic!("expected select, got {:?}", calls[1]);
    };
    assert_eq!(
        statement.pagination,
        Some(Pagination {
            limit: Some(10),
            offset: Some(0)
        })
    );
    assert_eq!(page.current, -3);
}

#[tokio::test]
async fn test_select_page_model() {
    let store = RecordingStore::with_rows(vec![json!({ "name": "k" })]);
    store.set_count(Ok(11));
    let dao = Dao::new(store);
    let query = Query::<User>::new().select(["name"]).order_by_asc(["name"]);

    let mut page: Page<UserName> = Page::new(2, 10);
    dao.select_page_model(&mut page, &query).await.unwrap();

    assert_eq!(page.total, 11);
    assert_eq!(
        page.records,
        vec![UserName {
            name: "k".to_string()
        }]
    );
}

#[tokio::test]
async fn test_descriptor_reusable_across_calls() {
    let store = RecordingStore::default();
    store.set_count(Ok(1));
    let dao = Dao::new(store);
    let query = Query::<User>::new()
        .eq("active", true)
        .and_bracket(|q| q.gt("age", 18))
        .or_bracket(|q| q.eq("name", "root"));

    dao.select_count(&query).await.unwrap();
    dao.select_count(&query).await.unwrap();

    let calls = dao.store().calls();
    let conditions: Vec<&Condition> = calls
        .iter()
        .map(|call| match call {
            Call::Count { statement, .. } => &statement.condition,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(conditions[0], conditions[1]);
    assert_eq!(conditions[0].sql, "active = ? AND (age > ?) OR (name = ?)");
    assert_eq!(conditions[0].args, vec![json!(true), json!(18), json!("root")]);
}
