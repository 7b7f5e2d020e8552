// Lead Form Model
// Field edits and smart-paste merges. Extraction itself runs through outreach::client.

pub mod form;
pub mod patch;
