//! HTML pages rendered through Tera.
//!
//! Templates are compiled into the binary and registered under `.html` names,
//! so Tera's autoescaping applies to everything interpolated into them.

use tera::{Context, Tera};
use tracing::debug;

use crate::menu::MenuTable;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("dashboard.html", include_str!("../templates/dashboard.html")),
];

/// Compiled page templates.
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        debug!(count = tera.get_template_names().count(), "loaded page templates");
        Ok(Pages { tera })
    }

    /// Context every page starts from: the shared navigation links.
    pub fn context(&self, menu: &MenuTable) -> Context {
        let mut context = Context::new();
        context.insert("nav", &menu.links().collect::<Vec<_>>());
        context
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(template, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;

    fn menu(name: &str, href: &str) -> MenuTable {
        MenuTable {
            sections: vec![],
            links: vec![MenuEntry {
                name: Some(name.to_string()),
                href: Some(href.to_string()),
                ..MenuEntry::default()
            }],
        }
    }

    #[test]
    fn all_pages_render() {
        let pages = Pages::new().expect("templates should compile");
        let mut context = pages.context(&menu("Pricing", "/pricing"));
        context.insert("login_path", "/login");
        context.insert("user_name", "ada");

        for template in ["home.html", "login.html", "dashboard.html"] {
            let html = pages.render(template, &context).expect(template);
            assert!(html.contains("Pricing"), "{}", template);
            assert!(html.contains("<main>"), "{}", template);
        }
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let pages = Pages::new().unwrap();
        let mut context = pages.context(&menu("<b>O'Reilly</b>", "/books\" onclick=\"x"));
        context.insert("user_name", "<script>alert(1)</script>");

        let html = pages.render("dashboard.html", &context).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;O&#x27;Reilly&lt;&#x2F;b&gt;"));
        assert!(!html.contains("\" onclick=\""));
    }
}
