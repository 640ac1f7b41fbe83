// Internal shared infrastructure for the Tessera library

pub mod error;
