//! Offline seed for the sample database.
//!
//! The canonical sample database is third-party content downloaded by the
//! fetch command. This module builds an equivalent small retail dataset
//! locally so the tutorial works offline and tests stay hermetic.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Declared column order of the products table, used by callers that
/// verify result shapes.
pub const PRODUCT_COLUMNS: [&str; 4] = ["id", "name", "category", "unit_price"];

/// Schema and contents of the sample retail dataset.
const SEED_SQL: &str = r#"
CREATE TABLE customers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    country TEXT NOT NULL
);

CREATE TABLE products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    unit_price REAL NOT NULL
);

CREATE TABLE orders (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customers(id),
    order_date TEXT NOT NULL
);

CREATE TABLE order_items (
    order_id INTEGER NOT NULL REFERENCES orders(id),
    product_id INTEGER NOT NULL REFERENCES products(id),
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    PRIMARY KEY (order_id, product_id)
);

INSERT INTO customers (id, name, city, country) VALUES
    (1, 'Alma Terra',      'Lisbon',     'Portugal'),
    (2, 'Bright & Co',     'Manchester', 'United Kingdom'),
    (3, 'Casa Verde',      'Porto',      'Portugal'),
    (4, 'Deniz Imports',   'Istanbul',   'Turkey'),
    (5, 'Eastline Ltd',    'Leeds',      'United Kingdom'),
    (6, 'Fjord Supplies',  'Bergen',     'Norway'),
    (7, 'Galeria Norte',   'Madrid',     'Spain'),
    (8, 'Hartman GmbH',    'Berlin',     'Germany');

INSERT INTO products (id, name, category, unit_price) VALUES
    (1,  'Earl Grey Tea',      'Beverages',  4.50),
    (2,  'Colombian Coffee',   'Beverages',  8.90),
    (3,  'Sparkling Water',    'Beverages',  1.20),
    (4,  'Sourdough Loaf',     'Bakery',     3.80),
    (5,  'Rye Crackers',       'Bakery',     2.40),
    (6,  'Almond Croissant',   'Bakery',     2.90),
    (7,  'Aged Gouda',         'Dairy',     12.50),
    (8,  'Goat Cheese',        'Dairy',      7.30),
    (9,  'Oat Milk',           'Dairy',      2.10),
    (10, 'Olive Tapenade',     'Pantry',     5.60),
    (11, 'Wildflower Honey',   'Pantry',     6.80),
    (12, 'Sea Salt Flakes',    'Pantry',     3.20);

INSERT INTO orders (id, customer_id, order_date) VALUES
    (1,  1, '2024-01-08'),
    (2,  2, '2024-01-12'),
    (3,  3, '2024-01-19'),
    (4,  1, '2024-02-02'),
    (5,  5, '2024-02-10'),
    (6,  4, '2024-02-21'),
    (7,  7, '2024-03-03'),
    (8,  2, '2024-03-14'),
    (9,  8, '2024-03-22'),
    (10, 6, '2024-04-01');

INSERT INTO order_items (order_id, product_id, quantity, unit_price) VALUES
    (1,  1,  3, 4.50),
    (1,  4,  2, 3.80),
    (2,  2,  1, 8.90),
    (2,  7,  1, 12.50),
    (2,  11, 2, 6.80),
    (3,  3,  6, 1.20),
    (3,  6,  4, 2.90),
    (4,  9,  2, 2.10),
    (4,  10, 1, 5.60),
    (5,  5,  5, 2.40),
    (5,  1,  1, 4.50),
    (6,  12, 3, 3.20),
    (6,  2,  2, 8.90),
    (7,  8,  2, 7.30),
    (7,  4,  1, 3.80),
    (8,  11, 1, 6.80),
    (8,  3,  12, 1.20),
    (9,  7,  2, 12.50),
    (9,  6,  6, 2.90),
    (10, 10, 2, 5.60),
    (10, 9,  4, 2.10);
"#;

/// Creates the sample database at `path` from the embedded seed script.
///
/// Fails if a file already exists at the path; callers decide whether to
/// remove it first.
pub fn write_sample(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Refusing to overwrite existing file {}", path.display());
    }

    let conn = Connection::open(path)
        .with_context(|| format!("Failed to create database at {}", path.display()))?;
    conn.execute_batch(SEED_SQL)
        .context("Failed to apply sample seed script")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use tempfile::tempdir;

    #[test]
    fn test_write_sample_creates_all_tables() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("sample.db");

        write_sample(&path).expect("Failed to seed sample database");

        let db = Database::open(&path).expect("Failed to open seeded database");
        let tables = db.list_tables().expect("Failed to list tables");
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["customers", "order_items", "orders", "products"],
            "Seeded database should contain the four sample tables"
        );
    }

    #[test]
    fn test_write_sample_refuses_overwrite() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("sample.db");
        std::fs::write(&path, b"existing").expect("Failed to write placeholder");

        let err = write_sample(&path).unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
    }

    #[test]
    fn test_seeded_products_has_at_least_five_rows() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("sample.db");
        write_sample(&path).expect("Failed to seed sample database");

        let db = Database::open(&path).expect("Failed to open seeded database");
        let count = db.table_count("products").expect("Failed to count products");
        assert!(count >= 5, "products should have at least 5 rows");
    }

    #[test]
    fn test_seeded_order_items_reference_valid_rows() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("sample.db");
        write_sample(&path).expect("Failed to seed sample database");

        let db = Database::open(&path).expect("Failed to open seeded database");
        let orphans = db
            .run_query(
                "SELECT COUNT(*) FROM order_items oi
                 LEFT JOIN orders o ON o.id = oi.order_id
                 LEFT JOIN products p ON p.id = oi.product_id
                 WHERE o.id IS NULL OR p.id IS NULL",
            )
            .expect("Failed to check referential integrity");

        assert_eq!(
            orphans.rows[0][0],
            crate::storage::SqlValue::Integer(0),
            "Every order item should reference an existing order and product"
        );
    }
}
