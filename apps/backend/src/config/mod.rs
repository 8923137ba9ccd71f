pub mod db;
pub mod lifecycle;
