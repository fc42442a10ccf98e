// SPDX-FileCopyrightText: 2025 databased contributors
// SPDX-License-Identifier: MIT

//! Smoke tests for databased.
//!
//! These tests exercise the full create/insert/query/update/delete cycle
//! against in-memory and file-backed databases.

use chrono::{NaiveDate, NaiveDateTime};
use databased::{Criteria, DataBased, FormatOptions, Value, data_to_string};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const KITCHEN: &str = "kitchenTables(numLegs int, topMaterial text, shape text, dateAdded timestamp)";

fn added(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap()
}

fn kitchen_row(legs: i64, material: &str, shape: &str, day: u32) -> Vec<Value> {
    vec![legs.into(), material.into(), shape.into(), added(day).into()]
}

fn fill(db: &mut DataBased) {
    db.create_tables(&[KITCHEN]).unwrap();
    db.add_to_table("kitchenTables", &kitchen_row(4, "birch", "round", 1))
        .unwrap();
    db.add_to_table("kitchenTables", &kitchen_row(3, "oak", "round", 2))
        .unwrap();
    db.add_to_table("kitchenTables", &kitchen_row(6, "granite", "rectangle", 3))
        .unwrap();
}

#[fixture]
fn kitchen() -> DataBased {
    let mut db = DataBased::in_memory();
    fill(&mut db);
    db
}

/// Verify the worked furniture example end to end.
#[rstest]
fn test_kitchen_tables(mut kitchen: DataBased) {
    assert_eq!(kitchen.count("kitchenTables").unwrap(), 3);

    let round = Criteria::new().eq("shape", "round");
    let rows = kitchen
        .get_rows("kitchenTables", Some(&round), Some("numLegs"))
        .unwrap();
    let materials: Vec<_> = rows.iter().map(|r| r.get("topMaterial").unwrap()).collect();
    assert_eq!(materials, [&Value::from("oak"), &Value::from("birch")]);
    assert_eq!(rows[0].get("dateAdded"), Some(&Value::Timestamp(added(2))));

    let changed = kitchen
        .update(
            "kitchenTables",
            "topMaterial",
            "glass",
            &Criteria::new().eq("numLegs", 3),
        )
        .unwrap();
    assert_eq!(changed, 1);

    let rows = kitchen
        .get_rows("kitchenTables", None, Some("numLegs"))
        .unwrap();
    let materials: Vec<_> = rows.iter().map(|r| r.get("topMaterial").unwrap()).collect();
    assert_eq!(
        materials,
        [
            &Value::from("glass"),
            &Value::from("birch"),
            &Value::from("granite")
        ]
    );
    assert_eq!(rows[0].get("shape"), Some(&Value::from("round")));
    assert_eq!(rows[0].get("numLegs"), Some(&Value::Integer(3)));
}

/// Creating an existing table again keeps its rows.
#[rstest]
fn test_create_tables_idempotent(mut kitchen: DataBased) {
    kitchen
        .create_tables(&[KITCHEN, "kitchenTables(other int)"])
        .unwrap();
    assert_eq!(kitchen.count("kitchenTables").unwrap(), 3);
    assert_eq!(
        kitchen.get_column_names("kitchenTables").unwrap(),
        ["numLegs", "topMaterial", "shape", "dateAdded"]
    );
}

#[rstest]
#[case::none(0)]
#[case::one(1)]
#[case::many(25)]
fn test_count_after_inserts(#[case] n: i64) {
    let mut db = DataBased::in_memory();
    db.create_tables(&["items(id int, label text)"]).unwrap();
    for i in 0..n {
        db.add_to_table("items", &[i.into(), format!("item {i}").into()])
            .unwrap();
    }
    assert_eq!(db.count("items").unwrap(), n as u64);
    assert_eq!(db.get_rows("items", None, None).unwrap().len(), n as usize);
}

/// Sorted reads are non-decreasing in the sort column.
#[rstest]
#[case("numLegs")]
#[case("topMaterial")]
#[case("dateAdded")]
fn test_sorted_rows(mut kitchen: DataBased, #[case] column: &str) {
    let rows = kitchen
        .get_rows("kitchenTables", None, Some(column))
        .unwrap();
    assert_eq!(rows.len(), 3);
    for pair in rows.windows(2) {
        let a = pair[0].get(column).unwrap();
        let b = pair[1].get(column).unwrap();
        assert!(a.sql_cmp(b).is_le(), "{a} sorted after {b}");
    }
}

#[rstest]
fn test_range_criteria(mut kitchen: DataBased) {
    let criteria = Criteria::new().gt("numLegs", 3).lt("numLegs", 6);
    let rows = kitchen
        .get_rows("kitchenTables", Some(&criteria), None)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("topMaterial"), Some(&Value::from("birch")));

    let since = Criteria::new().ge("dateAdded", added(2));
    assert_eq!(kitchen.count_matching("kitchenTables", &since).unwrap(), 2);
}

#[rstest]
fn test_delete_from(mut kitchen: DataBased) {
    let deleted = kitchen
        .delete_from("kitchenTables", &Criteria::new().eq("shape", "round"))
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(kitchen.count("kitchenTables").unwrap(), 1);

    let deleted = kitchen
        .delete_from("kitchenTables", &Criteria::new().eq("shape", "oval"))
        .unwrap();
    assert_eq!(deleted, 0);
}

/// Committed data survives closing and reopening the handle.
#[test]
fn test_reopen_preserves_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("furniture.db");

    let mut db = DataBased::new(&path);
    fill(&mut db);
    db.close().unwrap();
    assert!(path.exists());

    // any operation reopens the handle
    assert_eq!(db.count("kitchenTables").unwrap(), 3);
    db.close().unwrap();

    let mut other = DataBased::new(&path);
    assert_eq!(other.get_table_names().unwrap(), ["kitchenTables"]);
    let rows = other
        .get_rows("kitchenTables", Some(&Criteria::new().eq("numLegs", 6)), None)
        .unwrap();
    assert_eq!(rows[0].get("dateAdded"), Some(&Value::Timestamp(added(3))));
}

/// Dropping the handle commits like `close`.
#[test]
fn test_drop_commits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("furniture.db");
    {
        let mut db = DataBased::new(&path);
        fill(&mut db);
    }
    let mut db = DataBased::new(&path);
    assert_eq!(db.count("kitchenTables").unwrap(), 3);
}

/// Writes stay invisible to other connections until committed.
#[test]
fn test_uncommitted_writes_are_session_local() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("furniture.db");

    let mut writer = DataBased::new(&path);
    writer.create_tables(&["notes(body text)"]).unwrap();
    writer.commit().unwrap();
    writer.add_to_table("notes", &["draft".into()]).unwrap();
    assert_eq!(writer.count("notes").unwrap(), 1);

    let mut reader = DataBased::new(&path);
    assert_eq!(reader.count("notes").unwrap(), 0);
    reader.close().unwrap();

    writer.commit().unwrap();
    assert_eq!(reader.count("notes").unwrap(), 1);
}

/// An open handle that has only read does not block another handle's commit.
#[test]
fn test_idle_reader_does_not_block_commit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("furniture.db");

    let mut writer = DataBased::new(&path);
    writer.create_tables(&["notes(body text)"]).unwrap();
    writer.commit().unwrap();

    let mut reader = DataBased::new(&path);
    assert_eq!(reader.count("notes").unwrap(), 0);

    writer.add_to_table("notes", &["first".into()]).unwrap();
    writer.commit().unwrap();
    assert_eq!(reader.count("notes").unwrap(), 1);

    writer.add_to_table("notes", &["second".into()]).unwrap();
    writer.close().unwrap();
    assert_eq!(reader.count("notes").unwrap(), 2);
}

/// `%` and `_` in a search needle match only themselves.
#[test]
fn test_find_wildcards_are_literal() {
    let mut db = DataBased::in_memory();
    db.create_tables(&["discounts(label text)"]).unwrap();
    for label in ["500", "50%", "a_b", "axb", r"c\d"] {
        db.add_to_table("discounts", &[label.into()]).unwrap();
    }

    let rows = db.find("discounts", "50%", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("label"), Some(&Value::from("50%")));

    let rows = db.find("discounts", "a_b", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("label"), Some(&Value::from("a_b")));

    assert_eq!(db.find("discounts", "\\", &[]).unwrap().len(), 1);
}

#[rstest]
fn test_render_rows(mut kitchen: DataBased) {
    let rows = kitchen
        .find("kitchenTables", "oak", &["topMaterial"])
        .unwrap();
    let out = data_to_string(&rows, &FormatOptions::default());
    assert!(out.contains("| numLegs "));
    assert!(out.contains("| oak "));
    assert!(out.contains("2024-01-02 12:30:00"));
}
