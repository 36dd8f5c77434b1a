//! DOM binding: the [`Page`] implementation and the module entry point.

mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use log::{LevelFilter, debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, PageTransitionEvent, Window};

use crate::{FinderConfig, LocationController, LocationManager, Page, PageError, PageExit};

/// Id of an optional `<script type="application/json">` block overriding [`FinderConfig`].
pub const CONFIG_ELEMENT_ID: &str = "ecoponto-config";

type WebController = LocationController<WebPage, LocationManager>;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
}

/// [`Page`] backed by the live document.
pub struct WebPage {
    window: Window,
    document: Document,
    status_id: String,
    trigger_id: String,
    new_tab_target: String,
    on_click: RefCell<Option<Closure<dyn FnMut()>>>,
    bound: RefCell<Option<Element>>,
}

impl std::fmt::Debug for WebPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPage")
            .field("status_id", &self.status_id)
            .field("trigger_id", &self.trigger_id)
            .finish_non_exhaustive()
    }
}

impl WebPage {
    /// Wrap `document`, addressing elements by the ids in `config`.
    #[must_use]
    pub fn new(window: Window, document: Document, config: &FinderConfig) -> Self {
        Self {
            window,
            document,
            status_id: config.status_id.clone(),
            trigger_id: config.trigger_id.clone(),
            new_tab_target: config.new_tab_target.clone(),
            on_click: RefCell::new(None),
            bound: RefCell::new(None),
        }
    }

    /// Set the handler that [`Page::rebind_trigger`] attaches.
    pub fn set_click_handler(&self, handler: Closure<dyn FnMut()>) {
        *self.on_click.borrow_mut() = Some(handler);
    }

    /// Remove the click listener and release the handler.
    pub fn detach(&self) {
        if let (Some(element), Some(handler)) =
            (self.bound.borrow_mut().take(), self.on_click.borrow().as_ref())
        {
            let _ = element
                .remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
        }
        self.on_click.borrow_mut().take();
    }
}

impl Page for WebPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn render_status(&self, markup: &str) {
        match self.document.get_element_by_id(&self.status_id) {
            Some(container) => container.set_inner_html(markup),
            None => warn!("status container `#{}` vanished", self.status_id),
        }
    }

    fn navigate(&self, url: &str) -> Result<(), PageError> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| PageError::Navigation {
                url: url.to_owned(),
                reason: describe(&e),
            })
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), PageError> {
        match self
            .window
            .open_with_url_and_target(url, &self.new_tab_target)
        {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(PageError::PopupBlocked {
                url: url.to_owned(),
            }),
            Err(e) => Err(PageError::Navigation {
                url: url.to_owned(),
                reason: describe(&e),
            }),
        }
    }

    fn rebind_trigger(&self) -> bool {
        let Some(button) = self.document.get_element_by_id(&self.trigger_id) else {
            return false;
        };
        let handler = self.on_click.borrow();
        let Some(handler) = handler.as_ref() else {
            warn!("no click handler installed");
            return false;
        };
        if let Err(e) =
            button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        {
            warn!("failed to bind `#{}`: {}", self.trigger_id, describe(&e));
            return false;
        }
        *self.bound.borrow_mut() = Some(button);
        true
    }
}

/// Module entry point: mount the finder once the DOM is ready.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);

    let Some(window) = web_sys::window() else {
        error!("no window; the finder only runs in a browser page");
        return;
    };
    let Some(document) = window.document() else {
        error!("window has no document");
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = {
            let document = document.clone();
            Closure::once_into_js(move || mount(window, document))
        };
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            error!("cannot wait for DOMContentLoaded: {}", describe(&e));
        }
    } else {
        mount(window, document);
    }
}

fn mount(window: Window, document: Document) {
    let config = read_config(&document);
    match config.log_level_filter() {
        Ok(level) => log::set_max_level(level),
        Err(err) => warn!("{err}"),
    }

    let page = WebPage::new(window.clone(), document, &config);
    let controller = match LocationController::mount(page, LocationManager, config) {
        Ok(controller) => Rc::new(controller),
        Err(err) => {
            error!("{err}; map finder disabled");
            return;
        }
    };

    let weak = Rc::downgrade(&controller);
    controller
        .page()
        .set_click_handler(Closure::<dyn FnMut()>::new(move || {
            if let Some(controller) = weak.upgrade() {
                spawn_local(async move {
                    if controller.on_button_click().await.is_none() {
                        debug!("click ignored");
                    }
                });
            }
        }));

    if !controller.arm() {
        error!("could not bind the trigger button; map finder disabled");
        return;
    }

    // `pagehide` fires again after every restore from the back/forward cache.
    let on_pagehide = Closure::<dyn FnMut(PageTransitionEvent)>::new(
        |event: PageTransitionEvent| {
            if PageExit::from_persisted(event.persisted()).releases_controller() {
                teardown();
            } else {
                debug!("page cached; map finder stays mounted");
            }
        },
    );
    if let Err(e) = window
        .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())
    {
        warn!("cannot register teardown: {}", describe(&e));
    }
    on_pagehide.forget();

    MOUNTED.with(|slot| *slot.borrow_mut() = Some(controller));
    debug!("map finder mounted");
}

fn teardown() {
    if let Some(controller) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
        controller.page().detach();
        debug!("map finder torn down");
    }
}

fn read_config(document: &Document) -> FinderConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return FinderConfig::default();
    };

    FinderConfig::from_json(&json).unwrap_or_else(|err| {
        warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        FinderConfig::default()
    })
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
