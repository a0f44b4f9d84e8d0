//! Export and reload of typed tables.

use std::fs;
use tempfile::TempDir;

use chrono::NaiveDate;
use vehiscope::schema::DEFAULT_DATE_FORMAT;
use vehiscope::table::Categorical;
use vehiscope::{
    Column, ColumnData, Exporter, Loader, SchemaDocument, SemanticType, Table, TypeNormalizer,
    VehiscopeError,
};

fn export_and_reload(table: &Table) -> (Table, SchemaDocument, String) {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("clean.csv");
    let schema = dir.path().join("clean_dtypes.yaml");

    Exporter::new().export(table, &data, &schema).unwrap();
    let loaded = Loader::new().load(&data, &schema).unwrap();
    let doc = SchemaDocument::load(&schema).unwrap();
    let csv = fs::read_to_string(&data).unwrap();
    (loaded, doc, csv)
}

#[test]
fn test_price_reloads_as_float32() {
    let raw = Table::new(vec![Column::new(
        "price",
        ColumnData::Float64(vec![Some(12000.0), Some(15000.5)]),
    )])
    .unwrap();
    let (typed, _) = TypeNormalizer::new().normalize(&raw).unwrap();

    let (loaded, doc, _) = export_and_reload(&typed);
    assert_eq!(doc.column_type("price"), Some(SemanticType::Float32));
    assert_eq!(
        loaded.column("price").unwrap().data,
        ColumnData::Float32(vec![Some(12000.0), Some(15000.5)])
    );
}

#[test]
fn test_reload_preserves_order_types_and_values() {
    let posted = |d: u32| {
        NaiveDate::from_ymd_opt(2019, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    };
    let table = Table::with_index(
        vec![3, 7, 8],
        vec![
            Column::new("price", ColumnData::Float32(vec![Some(9400.0), Some(1.25), None])),
            Column::new("model_year", ColumnData::UInt16(vec![Some(2011), Some(2003), Some(2019)])),
            Column::new(
                "model",
                ColumnData::Category(Categorical::from_labels(vec![
                    Some("bmw x5"),
                    Some("ford f-150"),
                    Some("bmw x5"),
                ])),
            ),
            Column::new("cylinders", ColumnData::UInt8(vec![Some(6), Some(8), Some(4)])),
            Column::new(
                "date_posted",
                ColumnData::DateTime(vec![Some(posted(1)), Some(posted(22)), Some(posted(31))]),
            ),
            Column::new(
                "notes",
                ColumnData::Text(vec![Some("one, two".to_string()), None, Some("x".to_string())]),
            ),
        ],
    )
    .unwrap();

    let (loaded, doc, _) = export_and_reload(&table);
    assert_eq!(loaded, table);
    assert_eq!(doc.date_format, DEFAULT_DATE_FORMAT);
    assert_eq!(
        doc.columns.keys().collect::<Vec<_>>(),
        vec!["price", "model_year", "model", "cylinders", "date_posted", "notes"]
    );
    assert_eq!(doc.column_type("notes"), Some(SemanticType::Object));
}

#[test]
fn test_data_file_layout() {
    let table = Table::with_index(
        vec![0, 2],
        vec![
            Column::new("price", ColumnData::Float32(vec![Some(12000.0), None])),
            Column::new("cylinders", ColumnData::UInt8(vec![Some(6), Some(4)])),
        ],
    )
    .unwrap();

    let (_, _, csv) = export_and_reload(&table);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec![",price,cylinders", "0,12000,6", "2,,4"]);
}

#[test]
fn test_reload_with_edited_schema_fails() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("clean.csv");
    let schema = dir.path().join("clean_dtypes.yaml");
    let table = Table::new(vec![Column::new(
        "cylinders",
        ColumnData::Float32(vec![Some(6.5)]),
    )])
    .unwrap();
    Exporter::new().export(&table, &data, &schema).unwrap();

    // Narrowing to an integer is fine; a value that no longer fits is not.
    let mut doc = SchemaDocument::load(&schema).unwrap();
    doc.columns.insert("cylinders".to_string(), SemanticType::UInt8);
    fs::write(&data, ",cylinders\n0,300\n").unwrap();

    let result = Loader::new().load_with_schema(&data, &doc);
    assert!(matches!(result, Err(VehiscopeError::TypeCast { .. })));
}

#[test]
fn test_na_spelled_labels_survive_reload() {
    let table = Table::new(vec![
        Column::new(
            "notes",
            ColumnData::Text(vec![Some("None".to_string()), None, Some("x".to_string())]),
        ),
        Column::new(
            "type",
            ColumnData::Category(Categorical::from_labels(vec![
                Some("NA"),
                Some("suv"),
                Some("suv"),
            ])),
        ),
    ])
    .unwrap();

    let (loaded, _, _) = export_and_reload(&table);
    assert_eq!(loaded, table);
}

#[test]
fn test_empty_text_reloads_as_missing() {
    let table = Table::new(vec![Column::new(
        "notes",
        ColumnData::Text(vec![Some(String::new()), Some("x".to_string())]),
    )])
    .unwrap();

    let (loaded, _, _) = export_and_reload(&table);
    assert_eq!(
        loaded.column("notes").unwrap().data,
        ColumnData::Text(vec![None, Some("x".to_string())])
    );
}
