//! Walk a small form through the bridge
//!
//! Run with `RUST_LOG=msh_bridge=trace` to see every entry point.

use anyhow::{Context, Result};
use msh_bridge::property::FORM_PROPERTIES;
use msh_bridge::{BridgeHandle, Config, DispatchKind, ElementKind, ItemArg};
use msh_dom::Document;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Config::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => Config::default(),
    };
    println!("config: {}", serde_json::to_string(&config)?);

    let doc = Document::new("http://localhost/signup/index.html")?;
    let form_id = doc.append_element(doc.body(), "form");
    let user = doc.append_element(form_id, "input");
    doc.set_attribute(user, "name", "user")?;
    let bio = doc.append_element(form_id, "textarea");
    doc.set_attribute(bio, "id", "bio")?;

    let handle = BridgeHandle::create_with_config(ElementKind::Form, doc.node(form_id)?, config)?;
    let form = handle.as_form().context("form interface")?;

    form.put_action("submit")?;
    form.put_method("POST")?;
    if let Err(err) = form.put_method("PATCH") {
        println!("put_method(PATCH): {err} ({:#010x})", err.hresult());
    }
    println!("action = {}", form.get_action()?);
    println!("method = {}", form.get_method()?);
    println!("length = {}", form.get_length()?);

    let id = handle.get_ids_of_names("bio")?;
    println!("bio -> DISPID {id:#x}");
    let bio_node = handle.invoke(id, DispatchKind::PropertyGet, &[])?;
    let bio_node = bio_node.as_node().context("bio is an element")?;

    let textarea = BridgeHandle::create(ElementKind::TextArea, bio_node.node().clone())?
        .as_textarea()
        .context("textarea interface")?;
    textarea.put_value("Hello from the bridge")?;
    println!("bio.value = {:?}", textarea.handle().get("value")?);

    let user = form.item(&ItemArg::Name("user".into()), &ItemArg::Missing)?;
    println!("item(\"user\") = {user:?}");
    println!("item(5) = {:?}", form.item(&ItemArg::Index(5), &ItemArg::Missing)?);
    println!("name = {:?}", handle.get("name")?);

    println!("interface tables v{}", msh_bridge::INTERFACE_VERSION);
    println!("{}", serde_json::to_string_pretty(FORM_PROPERTIES)?);
    Ok(())
}
