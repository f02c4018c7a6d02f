use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EntryId);

/// Editable fields of the guest registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Organization,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Organization, FormField::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Organization => "organization",
            FormField::Message => "message",
        }
    }

    /// Field label as shown to visitors.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nama Lengkap",
            FormField::Organization => "Asal Instansi",
            FormField::Message => "Pesan",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownFormField(pub String);

impl FromStr for FormField {
    type Err = UnknownFormField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" | "nama" => Ok(FormField::Name),
            "organization" | "org" | "nama_instansi" | "asal_instansi" | "asalinstansi" => {
                Ok(FormField::Organization)
            }
            "message" | "pesan" => Ok(FormField::Message),
            _ => Err(UnknownFormField(raw.to_string())),
        }
    }
}
