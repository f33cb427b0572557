//! Token-standard classification
//!
//! ABIs are opaque JSON; classification only looks at the `name` fields of
//! entries whose `type` is `"function"`. Matching is a subset check: every
//! required function must be present, extra functions are ignored.

use serde_json::Value;

/// Token interface conventions handled specially by the deduplicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStandard {
    Erc20,
    Erc721,
}

impl TokenStandard {
    /// Function names an ABI must expose to count as this standard.
    pub const fn required_functions(&self) -> &'static [&'static str] {
        match self {
            Self::Erc20 => &[
                "transfer",
                "approve",
                "balanceOf",
                "totalSupply",
                "allowance",
                "transferFrom",
            ],
            Self::Erc721 => &[
                "ownerOf",
                "transferFrom",
                "approve",
                "balanceOf",
                "safeTransferFrom",
            ],
        }
    }

    /// Subset check against the ABI's function names.
    pub fn matches(&self, abi: &Value) -> bool {
        let names = function_names(abi);
        self.required_functions()
            .iter()
            .all(|required| names.iter().any(|name| name == required))
    }
}

impl std::fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Erc20 => write!(f, "ERC20"),
            Self::Erc721 => write!(f, "ERC721"),
        }
    }
}

/// Classify an ABI, ERC20 taking precedence when both sets are satisfied.
pub fn classify(abi: &Value) -> Option<TokenStandard> {
    if TokenStandard::Erc20.matches(abi) {
        Some(TokenStandard::Erc20)
    } else if TokenStandard::Erc721.matches(abi) {
        Some(TokenStandard::Erc721)
    } else {
        None
    }
}

/// Names of all `type == "function"` entries. Non-array ABIs and entries
/// without a `name` yield nothing.
fn function_names(abi: &Value) -> Vec<&str> {
    abi.as_array()
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.get("type").and_then(Value::as_str) == Some("function"))
                .filter_map(|entry| entry.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}
