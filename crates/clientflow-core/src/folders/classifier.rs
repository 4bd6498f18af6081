//! Naming-convention folder classification
//!
//! Personalized workflows are named `"<template name> - <client>"`, so the
//! `" - "` separator marks the client side of the tree.

pub const TEMPLATES_ROOT: &str = "Templates";
pub const CLIENTS_ROOT: &str = "Clients";

pub const GENERAL_TEMPLATES: &str = "Templates/General Templates";
pub const TESTING_TEMPLATES: &str = "Templates/Development/Testing";
pub const UNCATEGORIZED: &str = "Templates/Uncategorized";
pub const GENERAL_CLIENTS: &str = "Clients/General Clients";

const CLIENT_SEPARATOR: &str = " - ";

/// Keyword matched against the raw workflow name, and the label used for its subfolders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainRule {
    pub keyword: &'static str,
    pub label: &'static str,
}

/// Checked in order; the first match wins
pub const DOMAIN_RULES: &[DomainRule] = &[
    DomainRule {
        keyword: "PET CLINIC",
        label: "Pet Clinic",
    },
    DomainRule {
        keyword: "DENTAL",
        label: "Dental",
    },
    DomainRule {
        keyword: "REAL ESTATE",
        label: "Real Estate",
    },
    DomainRule {
        keyword: "RESTAURANT",
        label: "Restaurant",
    },
];

/// Folders seeded before building the folder view
pub const DEFAULT_FOLDERS: &[&str] = &[
    "Templates/Pet Clinic Templates",
    UNCATEGORIZED,
    "Clients/Pet Clinic Clients",
    GENERAL_CLIENTS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowCategory {
    Template,
    Client,
}

impl WorkflowCategory {
    pub fn of(workflow_name: &str) -> Self {
        if workflow_name.contains(CLIENT_SEPARATOR) {
            Self::Client
        } else {
            Self::Template
        }
    }
}

/// Folder path for a workflow name. Total: unmatched names land in a fallback folder.
pub fn classify(workflow_name: &str) -> String {
    let category = WorkflowCategory::of(workflow_name);

    if let Some(rule) = DOMAIN_RULES
        .iter()
        .find(|rule| workflow_name.contains(rule.keyword))
    {
        return match category {
            WorkflowCategory::Template => format!("{TEMPLATES_ROOT}/{} Templates", rule.label),
            WorkflowCategory::Client => format!("{CLIENTS_ROOT}/{} Clients", rule.label),
        };
    }

    let path = match category {
        WorkflowCategory::Client => GENERAL_CLIENTS,
        WorkflowCategory::Template
            if workflow_name.contains("TEMPLATE") || is_upper_case(workflow_name) =>
        {
            GENERAL_TEMPLATES
        }
        WorkflowCategory::Template
            if workflow_name.contains("TEST") || workflow_name.contains("test") =>
        {
            TESTING_TEMPLATES
        }
        WorkflowCategory::Template => UNCATEGORIZED,
    };
    path.to_string()
}

/// Has at least one letter and no lower-case letters
fn is_upper_case(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}
