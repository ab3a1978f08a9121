pub mod add_expense_modal;
pub mod dashboard;
pub mod landing;
pub mod sign_in;
pub mod sign_up;
