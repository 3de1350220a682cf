//! Bundled lesson content.
//!
//! Each lesson is a linear sequence of prose steps, most followed by one
//! example query against the sample retail database. Query steps are
//! independent; nothing feeds forward between them.

use super::{Lesson, LessonStep};

pub(super) const LESSONS: &[Lesson] = &[
    Lesson {
        number: 1,
        slug: "select-basics",
        title: "SELECT basics",
        steps: &[
            LessonStep {
                prose: "A SELECT statement reads rows from a table. The sample database \
                        is a small grocery wholesaler: customers place orders, orders \
                        contain products. Start by looking at the products table. \
                        'SELECT *' means every column, and LIMIT caps how many rows \
                        come back.",
                sql: Some("SELECT * FROM products LIMIT 5"),
            },
            LessonStep {
                prose: "Asking for every column is fine while exploring, but real \
                        queries name the columns they need. The column list controls \
                        both which values are returned and their order.",
                sql: Some("SELECT name, unit_price FROM products LIMIT 5"),
            },
            LessonStep {
                prose: "AS renames a column in the result. The table itself is \
                        untouched; only the output changes.",
                sql: Some("SELECT name AS product, unit_price AS price FROM products LIMIT 3"),
            },
            LessonStep {
                prose: "Prompting tip: when you ask an AI assistant to write SQL for \
                        you, paste the table schema first ('sqlcoach schema products' \
                        prints it). Assistants guess column names when they have to, \
                        and a guessed column is the most common reason a generated \
                        query fails. One schema plus one concrete question gets a \
                        correct query far more often than a vague request.",
                sql: None,
            },
        ],
    },
    Lesson {
        number: 2,
        slug: "where-filtering",
        title: "Filtering with WHERE",
        steps: &[
            LessonStep {
                prose: "WHERE keeps only the rows a condition is true for. Comparison \
                        operators work the way you expect; text values go in single \
                        quotes.",
                sql: Some("SELECT name, unit_price FROM products WHERE unit_price < 3.00"),
            },
            LessonStep {
                prose: "Equality on a text column filters to one category. Note that \
                        SQL string comparison is exact: 'Beverages' and 'beverages' \
                        are different values.",
                sql: Some("SELECT name, unit_price FROM products WHERE category = 'Beverages'"),
            },
            LessonStep {
                prose: "LIKE matches patterns. The percent sign stands for any run of \
                        characters, so '%Tea%' finds 'Tea' anywhere in the name.",
                sql: Some("SELECT name FROM products WHERE name LIKE '%Tea%'"),
            },
            LessonStep {
                prose: "ORDER BY sorts the result. Filtering and sorting compose: the \
                        WHERE clause runs first, then the survivors are ordered.",
                sql: Some(
                    "SELECT name, unit_price FROM products \
                     WHERE category = 'Pantry' ORDER BY unit_price DESC",
                ),
            },
            LessonStep {
                prose: "Prompting tip: ask for one query at a time. A request like \
                        'give me cheap pantry items, most expensive first' maps to \
                        exactly one WHERE and one ORDER BY, and you can check the \
                        result yourself. Bundling five questions into one prompt gets \
                        you five queries you cannot easily verify.",
                sql: None,
            },
        ],
    },
    Lesson {
        number: 3,
        slug: "joins",
        title: "Joining tables",
        steps: &[
            LessonStep {
                prose: "Orders store a customer_id, not a customer name. An INNER JOIN \
                        matches rows across tables through that key, so each order can \
                        be shown with the customer who placed it.",
                sql: Some(
                    "SELECT o.id, c.name, o.order_date FROM orders o \
                     INNER JOIN customers c ON c.id = o.customer_id \
                     ORDER BY o.order_date LIMIT 5",
                ),
            },
            LessonStep {
                prose: "Joins combine with aggregates. GROUP BY collapses rows that \
                        share a value, and SUM totals within each group. Here: units \
                        sold per product.",
                sql: Some(
                    "SELECT p.name, SUM(oi.quantity) AS units FROM order_items oi \
                     INNER JOIN products p ON p.id = oi.product_id \
                     GROUP BY p.name ORDER BY units DESC LIMIT 5",
                ),
            },
            LessonStep {
                prose: "A join can also climb the other direction: customers up to \
                        their countries, counting orders per country.",
                sql: Some(
                    "SELECT c.country, COUNT(o.id) AS orders FROM customers c \
                     INNER JOIN orders o ON o.customer_id = c.id \
                     GROUP BY c.country ORDER BY orders DESC",
                ),
            },
            LessonStep {
                prose: "Prompting tip: when a generated join fails or returns nonsense, \
                        paste the exact error text (or the surprising result) back to \
                        the assistant instead of rephrasing your request. The engine's \
                        error names the missing table or ambiguous column, and that is \
                        precisely the context the assistant was missing.",
                sql: None,
            },
        ],
    },
];
