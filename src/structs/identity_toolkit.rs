use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLookupRequest<'a> {
    pub id_token: &'a str,
}

#[derive(Deserialize)]
pub struct AccountLookupResponse {
    #[serde(default)]
    pub users: Vec<AccountInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub local_id: String,
    #[serde(default)]
    pub disabled: bool,
}
