//! Attribute parsing for the Choice derive macro.
//!
//! Container attributes: `#[choice(rename_all = "...", kind = "...")]`.
//! Variant attributes: `#[choice(rename = "...")]`.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, Result, Token,
};

/// How variant names turn into codes when no `rename` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameRule {
    /// `PastDue` -> `past_due`
    #[default]
    SnakeCase,
    /// `PastDue` -> `pastDue`
    CamelCase,
    /// `PastDue` -> `past-due`
    KebabCase,
    /// `PastDue` -> `pastdue`
    Lowercase,
}

impl RenameRule {
    /// Parse a rule from its string form.
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "snake_case" => Ok(RenameRule::SnakeCase),
            "camelCase" => Ok(RenameRule::CamelCase),
            "kebab-case" => Ok(RenameRule::KebabCase),
            "lowercase" => Ok(RenameRule::Lowercase),
            other => Err(Error::new(
                span,
                format!(
                    "unknown rename_all rule: '{}'. Expected one of: snake_case, camelCase, kebab-case, lowercase",
                    other
                ),
            )),
        }
    }

    /// Apply the rule to a variant identifier.
    pub fn apply(self, ident: &str) -> String {
        let words = split_words(ident);
        match self {
            RenameRule::SnakeCase => words.join("_"),
            RenameRule::KebabCase => words.join("-"),
            RenameRule::Lowercase => words.concat(),
            RenameRule::CamelCase => {
                let mut out = String::with_capacity(ident.len());
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(word);
                    } else {
                        let mut chars = word.chars();
                        if let Some(first) = chars.next() {
                            out.extend(first.to_uppercase());
                            out.push_str(chars.as_str());
                        }
                    }
                }
                out
            }
        }
    }
}

/// Split a PascalCase identifier into lowercase words.
///
/// A word starts at an uppercase letter that follows a lowercase letter or
/// digit, so runs of capitals stay together (`HTTPCode` -> `httpcode`).
fn split_words(ident: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;

    for c in ident.chars() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
        prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Container-level attributes from `#[choice(...)]` on the enum.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    pub rename_all: RenameRule,
    pub kind: Option<String>,
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    let lit = string_literal(&nv.value, "rename_all")?;
                    attr.rename_all = RenameRule::from_str(&lit.value(), lit.span())?;
                }
                Meta::NameValue(nv) if nv.path.is_ident("kind") => {
                    attr.kind = Some(string_literal(&nv.value, "kind")?.value());
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown choice attribute. Expected: rename_all = \"...\" or kind = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Variant-level attributes from `#[choice(...)]`.
#[derive(Debug, Clone)]
pub struct VariantAttr {
    /// Explicit code for this variant.
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for VariantAttr {
    fn default() -> Self {
        VariantAttr {
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for VariantAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = VariantAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let lit = string_literal(&nv.value, "rename")?;
                    if lit.value().is_empty() {
                        return Err(Error::new(lit.span(), "rename must not be empty"));
                    }
                    attr.rename = Some(lit.value());
                    attr.span = lit.span();
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown choice attribute. Expected: rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

fn string_literal(expr: &Expr, name: &str) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", name),
        )),
    }
}

/// Extract the container `#[choice(...)]` attribute.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    for attr in attrs {
        if attr.path().is_ident("choice") {
            return attr.parse_args::<ContainerAttr>();
        }
    }
    Ok(ContainerAttr::default())
}

/// Extract a variant's `#[choice(...)]` attribute.
pub fn parse_variant_attrs(attrs: &[Attribute]) -> Result<VariantAttr> {
    for attr in attrs {
        if attr.path().is_ident("choice") {
            return attr.parse_args::<VariantAttr>();
        }
    }
    Ok(VariantAttr::default())
}
