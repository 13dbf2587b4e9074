//! Configuration module
//!
//! Environment-driven configuration for the store backends and the signed-in
//! owner used by the demo binary. Read once at startup; components receive
//! already-constructed collaborators, never the environment.

use std::env;

/// Blob store backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Some(StorageBackend::Local),
            "s3" => Some(StorageBackend::S3),
            "memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Local => "local",
            StorageBackend::S3 => "s3",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Document store backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStoreBackend {
    Local,
    Rest,
    Memory,
}

impl DocStoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Some(DocStoreBackend::Local),
            "rest" => Some(DocStoreBackend::Rest),
            "memory" => Some(DocStoreBackend::Memory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocStoreBackend::Local => "local",
            DocStoreBackend::Rest => "rest",
            DocStoreBackend::Memory => "memory",
        }
    }
}

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    storage_backend: Option<StorageBackend>,
    storage_path: Option<String>,
    storage_base_url: Option<String>,
    s3_bucket: Option<String>,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    docstore_backend: Option<DocStoreBackend>,
    docstore_path: Option<String>,
    docstore_url: Option<String>,
    docstore_token: Option<String>,
    owner_id: Option<String>,
    owner_name: Option<String>,
    owner_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            storage_backend: env::var("AUTOLOT_STORAGE_BACKEND")
                .ok()
                .and_then(|v| StorageBackend::parse(&v)),
            storage_path: read("AUTOLOT_STORAGE_PATH"),
            storage_base_url: read("AUTOLOT_STORAGE_BASE_URL"),
            s3_bucket: read("AUTOLOT_S3_BUCKET"),
            s3_region: read("AUTOLOT_S3_REGION"),
            s3_endpoint: read("AUTOLOT_S3_ENDPOINT"),
            docstore_backend: env::var("AUTOLOT_DOCSTORE_BACKEND")
                .ok()
                .and_then(|v| DocStoreBackend::parse(&v)),
            docstore_path: read("AUTOLOT_DOCSTORE_PATH"),
            docstore_url: read("AUTOLOT_DOCSTORE_URL"),
            docstore_token: read("AUTOLOT_DOCSTORE_TOKEN"),
            owner_id: read("AUTOLOT_OWNER_ID"),
            owner_name: read("AUTOLOT_OWNER_NAME"),
            owner_email: read("AUTOLOT_OWNER_EMAIL"),
        }
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn storage_path(&self) -> Option<&str> {
        self.storage_path.as_deref()
    }

    pub fn storage_base_url(&self) -> Option<&str> {
        self.storage_base_url.as_deref()
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn docstore_backend(&self) -> Option<DocStoreBackend> {
        self.docstore_backend
    }

    pub fn docstore_path(&self) -> Option<&str> {
        self.docstore_path.as_deref()
    }

    pub fn docstore_url(&self) -> Option<&str> {
        self.docstore_url.as_deref()
    }

    pub fn docstore_token(&self) -> Option<&str> {
        self.docstore_token.as_deref()
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }
}

fn read(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
