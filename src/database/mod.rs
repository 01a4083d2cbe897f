//! Módulo de base de dados
//!
//! Maneja a conexão e migrações do PostgreSQL.

pub mod connection;

pub use connection::DatabaseConnection;
