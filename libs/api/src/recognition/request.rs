use entity::prelude::Language;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Multipart form of an identification request.
#[derive(ToSchema)]
pub struct RecognizeObjectForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub language: Option<Language>,
}

#[derive(Deserialize, IntoParams, Default)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct RecognizeObjectParam {
    /// Used when the form has no `language` part.
    #[param(value_type = Option<String>)]
    pub language: Language,
}
