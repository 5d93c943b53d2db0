use serde::Deserialize;

/// Raw form edit: the value arrives as typed by the user.
#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EditModeRequest {
    pub editing: bool,
}
