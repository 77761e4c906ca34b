pub mod health;
pub mod pushup;
