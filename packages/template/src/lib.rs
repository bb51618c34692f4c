//! # Weft Template
//!
//! Declarative templating and data binding over the live `weft-dom`
//! tree.
//!
//! A loose [`Definition`] is normalized once into a canonical
//! [`Template`], which can then:
//!
//! - [`render`](Template::render) a brand-new node tree,
//! - [`apply`](Template::apply) its bindings and listeners onto an
//!   existing tree without creating nodes, or
//! - [`extend`](Template::extend) itself with a further definition
//!   fragment, merged deeply and positionally.
//!
//! Bindings created through [`bind`] link data-source attributes to
//! tree writes (text content, namespaced attributes, inline style
//! properties) and native node events back to the data source. They
//! stay live until their listener owner tears them down; the engine
//! itself never unsubscribes anything.
//!
//! ```rust,ignore
//! use weft_reactive::{ListenerOwner, Observable};
//! use weft_template::{bind, Definition, Template};
//!
//! let source = Observable::with_attributes(serde_json::json!({ "title": "hi" }));
//! let owner = ListenerOwner::new();
//! let bind = bind(&source, &owner);
//!
//! let template = Template::new(
//!     Definition::element("p")
//!         .attr("class", vec!["card".into(), bind.when_value("busy", "is-busy").into()])
//!         .child(Definition::text(bind.to("title"))),
//! );
//! let node = template.render()?;
//! source.set("title", "hello"); // node text follows
//! ```

pub mod binding;
pub mod definition;
pub mod error;
pub mod normalize;
pub mod schema;
pub mod template;
pub mod writer;

mod extend;
mod render;

#[cfg(test)]
mod tests_render;

#[cfg(test)]
mod tests_binding;

#[cfg(test)]
mod tests_extend;


pub use binding::{bind, Bind, Binding, EventHandler, Transform};
pub use definition::{
    AttrValue, ChildDef, DefValue, Definition, ListenerEntry, ListenerValue, TextValue,
};
pub use error::{TemplateError, TemplateResult};
pub use normalize::normalize;
pub use schema::{array_value_reducer, is_falsy, value_text, SchemaEntry};
pub use template::{AttrSchema, Child, Template, VisualComponent, VisualComponentCollection};
pub use writer::Writer;
