pub mod expense_mapper;
