pub mod companies;
pub mod invoices;
