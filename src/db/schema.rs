//! SQL DDL for the contact-form table.

/// MySQL schema with:
/// - `id` INT AUTO_INCREMENT identity
/// - `name` and `email` required, the rest nullable
/// - `created_at` assigned by the server on insert
///
/// `IF NOT EXISTS` makes repeated bootstraps a no-op.
pub const CONTACTS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    company VARCHAR(255),
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(255),
    message TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;
