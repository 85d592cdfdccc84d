use serde::Serialize;

use crate::Result;

pub trait ToJson {
    fn to_json(&self) -> Result<String>;
    fn to_json_pretty(&self) -> Result<String>;
}

impl<T: Serialize + ?Sized> ToJson for T {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
