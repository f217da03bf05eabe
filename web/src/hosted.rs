//! Mounting into an existing HTML page.
//!
//! Every mount point gets its own Dioxus root. All selectors are resolved
//! before the first root launches, so a missing mount point aborts
//! initialization without leaving half the page wired up.
//!
//! `<collapse-panel>` is registered with `customElements.define`: panels
//! inserted later are mounted when they connect, and a removed panel's root
//! (and its attribute observer) is dropped when it disconnects.

use std::cell::{Cell, RefCell};

use dioxus::prelude::*;
use futures_util::future::{abortable, AbortHandle};
use futures_util::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MutationObserver, MutationObserverInit};

use ui::mount::{
    self, MountConfig, MountHost, MountedRoot, MountedRoots, PanelAttributes, CONFIG_ELEMENT_ID,
    PANEL_OBSERVED_ATTRIBUTES,
};
use ui::widgets::liker::LikerWidgetProps;
use ui::{CollapsePanel, FeedbackWidget, LikerWidget, WidgetError};

/// Counts of what [`mount_page`] launched.
#[derive(Debug, Default)]
pub struct MountSummary {
    pub panels: usize,
    pub feedback: bool,
    pub likers: usize,
}

#[derive(Clone)]
struct PageDocument {
    document: Document,
}

impl MountHost for PageDocument {
    type Node = web_sys::Element;

    fn query_all(&self, selector: &str) -> Result<Vec<web_sys::Element>, WidgetError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|_| WidgetError::Dom(format!("invalid selector `{selector}`")))?;
        Ok((0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect())
    }

    fn attribute(&self, node: &web_sys::Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }
}

pub fn mount_page() -> Result<MountSummary, WidgetError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| WidgetError::Dom("document unavailable".into()))?;
    let config = read_config(&document)?;
    let host = PageDocument { document };

    let panel_tag = config.panel_selector.as_deref();
    let panels = match panel_tag {
        Some(tag) => {
            mount::validate_custom_element_name(tag)?;
            html_elements(mount::resolve_all(&host, tag)?, tag)?
        }
        None => Vec::new(),
    };
    let feedback = match config.feedback_selector.as_deref() {
        Some(selector) => {
            let node = mount::resolve_one(&host, selector)?;
            html_elements(vec![node], selector)?.pop()
        }
        None => None,
    };
    let likers = match config.liker_selector.as_deref() {
        Some(selector) => html_elements(mount::resolve_all(&host, selector)?, selector)?,
        None => Vec::new(),
    };

    let summary = MountSummary {
        panels: panels.len(),
        feedback: feedback.is_some(),
        likers: likers.len(),
    };

    // Defining the element upgrades the panels already in the document.
    if let Some(tag) = panel_tag {
        register_panel_element(tag, host.clone())?;
    }

    if let Some(element) = feedback {
        launch_at(&element, VirtualDom::new(FeedbackWidget));
    }

    for element in likers {
        let label = element.get_attribute("data-label").unwrap_or_default();
        let props = LikerWidgetProps::builder().label(label).build();
        launch_at(&element, VirtualDom::new_with_props(LikerWidget, props));
    }

    Ok(summary)
}

fn read_config(document: &Document) -> Result<MountConfig, WidgetError> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(block) => MountConfig::from_json(&block.text_content().unwrap_or_default()),
        None => Ok(MountConfig::default()),
    }
}

/// Mount points must be HTML elements (not SVG or MathML nodes).
fn html_elements(
    nodes: Vec<web_sys::Element>,
    selector: &str,
) -> Result<Vec<web_sys::Element>, WidgetError> {
    for node in &nodes {
        if node.dyn_ref::<HtmlElement>().is_none() {
            return Err(WidgetError::UnexpectedNodeType {
                selector: selector.to_string(),
                expected: "HTML element",
            });
        }
    }
    Ok(nodes)
}

thread_local! {
    static NEXT_ROOT: Cell<u32> = const { Cell::new(0) };
    static PANEL_ROOTS: RefCell<MountedRoots<AbortHandle>> = RefCell::new(MountedRoots::default());
}

/// Start a Dioxus root inside `element`. Aborting the returned handle drops
/// the `VirtualDom` and everything its hooks hold.
fn launch_at(element: &web_sys::Element, vdom: VirtualDom) -> AbortHandle {
    if element.id().is_empty() {
        let index = NEXT_ROOT.with(|next| next.replace(next.get() + 1));
        element.set_id(&format!("pagewidgets-root-{index}"));
    }
    let config = dioxus::web::Config::new().rootname(element.id());
    let (root, handle) = abortable(async move {
        dioxus::web::run(vdom, config).await;
    });
    wasm_bindgen_futures::spawn_local(async move {
        let _ = root.await;
    });
    handle
}

/// Define `tag` as a custom element whose connect/disconnect callbacks mount
/// and tear down a panel root. A tag that is already defined is left alone.
fn register_panel_element(tag: &str, host: PageDocument) -> Result<(), WidgetError> {
    let registry = web_sys::window()
        .ok_or_else(|| WidgetError::Dom("window unavailable".into()))?
        .custom_elements();
    if !registry.get(tag).is_undefined() {
        tracing::debug!(tag, "custom element already defined");
        return Ok(());
    }

    let connected = Closure::<dyn FnMut(web_sys::Element)>::new(move |element| {
        connect_panel(&host, element);
    });
    let disconnected = Closure::<dyn FnMut(web_sys::Element)>::new(disconnect_panel);

    let factory = js_sys::Function::new_with_args(
        "connected, disconnected",
        "return class extends HTMLElement {\
            connectedCallback() { connected(this); }\
            disconnectedCallback() { disconnected(this); }\
        };",
    );
    let class = factory
        .call2(&JsValue::NULL, connected.as_ref(), disconnected.as_ref())
        .map_err(|err| WidgetError::Dom(format!("custom element class for `{tag}`: {err:?}")))?;
    registry
        .define(tag, class.unchecked_ref())
        .map_err(|err| WidgetError::Dom(format!("customElements.define(`{tag}`): {err:?}")))?;

    // The registry calls back for the lifetime of the page.
    connected.forget();
    disconnected.forget();
    Ok(())
}

fn connect_panel(host: &PageDocument, element: web_sys::Element) {
    let id = element.id();
    if !id.is_empty() && PANEL_ROOTS.with(|roots| roots.borrow().is_mounted(&id)) {
        return;
    }
    let initial = mount::panel_attributes(host, &element);
    let original_html = element.inner_html();
    element.set_inner_html("");

    let props = HostedPanelProps {
        element: element.clone(),
        initial,
        body_html: original_html.clone(),
    };
    let handle = launch_at(&element, VirtualDom::new_with_props(HostedPanel, props));
    let key = element.id();
    PANEL_ROOTS.with(|roots| {
        roots.borrow_mut().connect(
            &key,
            MountedRoot {
                handle,
                original_html,
            },
        )
    });
    tracing::debug!(id = %key, "collapse-panel connected");
}

fn disconnect_panel(element: web_sys::Element) {
    let key = element.id();
    let Some(root) = PANEL_ROOTS.with(|roots| roots.borrow_mut().disconnect(&key)) else {
        return;
    };
    root.handle.abort();
    element.set_inner_html(&root.original_html);
    tracing::debug!(id = %key, "collapse-panel disconnected");
}

#[derive(Props, Clone, PartialEq)]
struct HostedPanelProps {
    element: web_sys::Element,
    initial: PanelAttributes,
    body_html: String,
}

/// `<collapse-panel>` host: the element's attributes drive the panel and its
/// existing markup becomes the panel body.
#[allow(non_snake_case)]
fn HostedPanel(props: HostedPanelProps) -> Element {
    let attrs = use_observed_attributes(props.element.clone(), props.initial.clone());
    let PanelAttributes {
        title,
        default_open,
    } = attrs();

    rsx! {
        CollapsePanel { title, default_open,
            div { dangerous_inner_html: "{props.body_html}" }
        }
    }
}

struct AttributeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl Drop for AttributeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Mirror the panel attributes of `element` into a signal, re-reading them
/// whenever a MutationObserver reports a change.
fn use_observed_attributes(
    element: web_sys::Element,
    initial: PanelAttributes,
) -> Signal<PanelAttributes> {
    let mut attrs = use_signal(|| initial);

    let reader = element.clone();
    let refresh = use_coroutine(move |mut rx: UnboundedReceiver<()>| {
        let reader = reader.clone();
        async move {
            while rx.next().await.is_some() {
                let title = reader.get_attribute("title");
                let default_open = reader.get_attribute("default-open");
                let next = PanelAttributes::from_raw(title.as_deref(), default_open.as_deref());
                if *attrs.peek() != next {
                    tracing::debug!(?next, "collapse-panel attributes changed");
                    attrs.set(next);
                }
            }
        }
    });

    use_hook(move || {
        let tx = refresh.tx();
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                let _ = tx.unbounded_send(());
            },
        );

        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                tracing::warn!("attribute observer unavailable: {err:?}");
                return None;
            }
        };

        let filter: js_sys::Array = PANEL_OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect();
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&filter);
        if let Err(err) = observer.observe_with_options(&element, &init) {
            tracing::warn!("attribute observer failed to start: {err:?}");
        }

        Some(std::rc::Rc::new(AttributeObserver {
            observer,
            _callback: callback,
        }))
    });

    attrs
}
