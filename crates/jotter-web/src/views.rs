use jotter_core::util::trim_details;
use minijinja::{Environment, Value};

const TEMPLATES: &[(&str, &str)] = &[
    (
        "layouts/main.html",
        include_str!("../templates/layouts/main.html"),
    ),
    (
        "partials/flash.html",
        include_str!("../templates/partials/flash.html"),
    ),
    (
        "partials/errors.html",
        include_str!("../templates/partials/errors.html"),
    ),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("notes/list.html", include_str!("../templates/notes/list.html")),
    ("notes/add.html", include_str!("../templates/notes/add.html")),
    ("notes/edit.html", include_str!("../templates/notes/edit.html")),
    ("notes/show.html", include_str!("../templates/notes/show.html")),
    ("errors/404.html", include_str!("../templates/errors/404.html")),
    ("errors/500.html", include_str!("../templates/errors/500.html")),
];

/// Compiled page templates.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_filter("trim_details", trim_details_filter);
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, context: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

fn trim_details_filter(value: String) -> String {
    trim_details(&value)
}
