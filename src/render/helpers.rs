//! Helpers available inside templates.
//!
//! ```text
//! {{snake_case name}}  -> my_app
//! {{pascal_case name}} -> MyApp
//! ```
//!
//! Helpers follow the renderer's lenient policy: an argument that names a
//! missing variable renders as the empty string instead of failing.
//!
//! Every helper here also yields to the context. Written bare, as `{{lower}}`
//! or `{{len}}`, it renders the variable of that name, so template variables
//! may share a name with a helper. This covers the casing helpers and the
//! handlebars expression helpers, which are re-registered below with the same
//! behaviour. The block helpers (`if`, `unless`, `each`, `with`, `raw`) keep
//! their keywords.

use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, JsonTruthy, RenderContext,
    RenderError, RenderErrorReason, ScopedJson,
};
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};
use serde_json::Value;

/// Convert a helper argument to text.
fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

handlebars_helper!(upper: |v: Json| text(v).to_uppercase());
handlebars_helper!(lower: |v: Json| text(v).to_lowercase());
handlebars_helper!(snake_case: |v: Json| text(v).to_snake_case());
handlebars_helper!(kebab_case: |v: Json| text(v).to_kebab_case());
handlebars_helper!(camel_case: |v: Json| text(v).to_lower_camel_case());
handlebars_helper!(pascal_case: |v: Json| text(v).to_upper_camel_case());
handlebars_helper!(title_case: |v: Json| text(v).to_title_case());

handlebars_helper!(eq: |x: Json, y: Json| x == y);
handlebars_helper!(ne: |x: Json, y: Json| x != y);
handlebars_helper!(gt: |x: i64, y: i64| x > y);
handlebars_helper!(gte: |x: i64, y: i64| x >= y);
handlebars_helper!(lt: |x: i64, y: i64| x < y);
handlebars_helper!(lte: |x: i64, y: i64| x <= y);
handlebars_helper!(and: |x: Json, y: Json| x.is_truthy(false) && y.is_truthy(false));
handlebars_helper!(or: |x: Json, y: Json| x.is_truthy(false) || y.is_truthy(false));
handlebars_helper!(not: |x: Json| !x.is_truthy(false));
handlebars_helper!(len: |x: Json| match x {
    Value::Array(a) => a.len(),
    Value::Object(m) => m.len(),
    Value::String(s) => s.len(),
    _ => 0,
});

/// `{{lookup collection key}}`: index an array by number or an object by key.
struct Lookup;

impl HelperDef for Lookup {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let collection = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("lookup", 0))?
            .value();
        let key = h
            .param(1)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("lookup", 1))?
            .value();

        let found = match (collection, key) {
            (Value::Array(items), Value::Number(n)) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| items.get(i)),
            (Value::Object(map), Value::String(k)) => map.get(k),
            _ => None,
        };

        Ok(found
            .cloned()
            .map(ScopedJson::Derived)
            .unwrap_or(ScopedJson::Missing))
    }
}

/// `{{log value...}}`: send the arguments to the debug log, render nothing.
struct Log;

impl HelperDef for Log {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let message = h
            .params()
            .iter()
            .map(|p| text(p.value()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(message = %message, "Template log");
        Ok(ScopedJson::Derived(Value::Null))
    }
}

/// A helper that renders the context variable `name` when called bare.
struct OrVariable<H> {
    name: &'static str,
    helper: H,
}

impl<H: HelperDef> HelperDef for OrVariable<H> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        if h.params().is_empty() && h.hash().is_empty() {
            return Ok(ctx
                .data()
                .get(self.name)
                .map(ScopedJson::Constant)
                .unwrap_or(ScopedJson::Missing));
        }
        self.helper.call_inner(h, r, ctx, rc)
    }
}

fn register<H>(handlebars: &mut Handlebars<'_>, name: &'static str, helper: H)
where
    H: HelperDef + Send + Sync + 'static,
{
    handlebars.register_helper(name, Box::new(OrVariable { name, helper }));
}

/// Register every built-in helper.
pub fn register_helpers(handlebars: &mut Handlebars<'_>) {
    register(handlebars, "upper", upper);
    register(handlebars, "lower", lower);
    register(handlebars, "snake_case", snake_case);
    register(handlebars, "kebab_case", kebab_case);
    register(handlebars, "camel_case", camel_case);
    register(handlebars, "pascal_case", pascal_case);
    register(handlebars, "title_case", title_case);

    register(handlebars, "eq", eq);
    register(handlebars, "ne", ne);
    register(handlebars, "gt", gt);
    register(handlebars, "gte", gte);
    register(handlebars, "lt", lt);
    register(handlebars, "lte", lte);
    register(handlebars, "and", and);
    register(handlebars, "or", or);
    register(handlebars, "not", not);
    register(handlebars, "len", len);
    register(handlebars, "lookup", Lookup);
    register(handlebars, "log", Log);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, data: Value) -> String {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut hb);
        hb.render_template(template, &data).unwrap()
    }

    #[test]
    fn casing_helpers() {
        let data = serde_json::json!({"name": "my web app"});
        assert_eq!(render("{{upper name}}", data.clone()), "MY WEB APP");
        assert_eq!(render("{{snake_case name}}", data.clone()), "my_web_app");
        assert_eq!(render("{{kebab_case name}}", data.clone()), "my-web-app");
        assert_eq!(render("{{camel_case name}}", data.clone()), "myWebApp");
        assert_eq!(render("{{pascal_case name}}", data.clone()), "MyWebApp");
        assert_eq!(render("{{title_case name}}", data), "My Web App");
    }

    #[test]
    fn lower_handles_numbers() {
        let data = serde_json::json!({"n": 42});
        assert_eq!(render("{{lower n}}", data), "42");
    }

    #[test]
    fn missing_argument_renders_empty() {
        assert_eq!(render("[{{upper nope}}]", serde_json::json!({})), "[]");
    }

    #[test]
    fn bare_helper_name_renders_variable() {
        let data = serde_json::json!({"lower": "x", "len": "y", "eq": "z", "lookup": "w"});
        assert_eq!(render("{{lower}}-{{len}}-{{eq}}-{{lookup}}", data), "x-y-z-w");
    }

    #[test]
    fn bare_helper_name_without_variable_is_empty() {
        assert_eq!(render("[{{upper}}][{{not}}]", serde_json::json!({})), "[][]");
    }

    #[test]
    fn variable_named_like_helper_still_allows_calls() {
        let data = serde_json::json!({"upper": "up", "name": "app"});
        assert_eq!(render("{{upper}} {{upper name}}", data), "up APP");
    }

    #[test]
    fn expression_helpers_keep_working() {
        let data = serde_json::json!({"a": 5, "b": 3, "items": ["x", "y"], "m": {"k": "v"}});
        assert_eq!(render("{{#if (gt a b)}}yes{{else}}no{{/if}}", data.clone()), "yes");
        assert_eq!(render("{{#if (eq a 5)}}five{{/if}}", data.clone()), "five");
        assert_eq!(render("{{#if (and a (not b))}}x{{else}}y{{/if}}", data.clone()), "y");
        assert_eq!(render("{{len items}}", data.clone()), "2");
        assert_eq!(render("{{lookup items 1}}{{lookup m \"k\"}}", data.clone()), "yv");
        assert_eq!(render("[{{log a}}]", data), "[]");
    }
}
