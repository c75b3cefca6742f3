use serde::{Deserialize, Serialize};

use super::user_question_key;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub test_id: String,
    pub question_number: u32,
    pub is_favorite: bool,
}

impl Favorite {
    pub fn new(user_id: &str, test_id: &str, question_number: u32, is_favorite: bool) -> Self {
        Favorite {
            id: user_question_key(user_id, test_id, question_number),
            user_id: user_id.to_string(),
            test_id: test_id.to_string(),
            question_number,
            is_favorite,
        }
    }
}
