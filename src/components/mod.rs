//! UI Components
//!
//! Leptos components for the login and books screens.

mod book_card;
mod book_list;
mod books_header;
mod books_page;
mod delete_confirm_button;
mod login_form;

pub use book_card::BookCard;
pub use book_list::BookList;
pub use books_header::BooksHeader;
pub use books_page::BooksPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_form::LoginForm;
