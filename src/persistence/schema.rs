//! The two-relation Postgres schema: one row per order, one row per drink,
//! cascade-deleted with their parent order.

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS orders (
    order_id BIGINT PRIMARY KEY,
    customer TEXT NOT NULL,
    date_received DATE NOT NULL,
    time_received TIME NOT NULL,
    time_complete TIME
);

CREATE TABLE IF NOT EXISTS drinks (
    identifier BIGINT PRIMARY KEY,
    order_id BIGINT NOT NULL REFERENCES orders(order_id) ON DELETE CASCADE,
    drink TEXT NOT NULL,
    milk TEXT,
    milk_volume DOUBLE PRECISION NOT NULL DEFAULT 0,
    shots INTEGER NOT NULL DEFAULT 1,
    temperature TEXT,
    texture TEXT,
    options TEXT NOT NULL DEFAULT '',
    customer TEXT NOT NULL DEFAULT '',
    time_received TIME,
    time_complete TIME
);

CREATE INDEX IF NOT EXISTS drinks_order_id_idx ON drinks(order_id);
"#;
