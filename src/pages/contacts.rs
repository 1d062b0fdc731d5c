use serde::Serialize;

use crate::data::{ContactBook, ContactDirectory};

#[derive(Debug, Clone, Serialize)]
pub struct ContactsView {
    #[serde(flatten)]
    pub book: ContactBook,
}

pub async fn load(directory: &dyn ContactDirectory) -> ContactsView {
    ContactsView { book: directory.contact_book().await }
}
