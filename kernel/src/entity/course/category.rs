use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{fail, KernelError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Web,
    Mobile,
    Network,
}

impl FromStr for CourseCategory {
    type Err = error_stack::Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            "network" => Ok(Self::Network),
            other => Err(fail(
                KernelError::Validation,
                format!("`{other}` is not a course category (web, mobile, network)"),
            )),
        }
    }
}
