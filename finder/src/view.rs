use crate::FinderConfig;

const CTA_LINK_STYLE: &str = "display: inline-block; margin-top: 10px;";
const CTA_BUTTON_STYLE: &str = "margin-top: 10px;";

/// What the status container shows in each phase of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    /// Waiting on the browser's permission prompt and position fix.
    Searching,
    /// Mobile success; the page is navigating to `url`.
    Redirecting {
        /// Map URL, also offered as a manual link.
        url: String,
    },
    /// Desktop success; the map opened in a new tab.
    Opened,
    /// The position query failed for any reason.
    Denied {
        /// Fixed map offered instead.
        fallback: String,
    },
    /// The browser has no geolocation at all.
    Unsupported,
}

impl StatusView {
    /// Whether this view renders a fresh trigger button that needs a listener.
    #[must_use]
    pub const fn offers_trigger(&self) -> bool {
        matches!(self, Self::Opened | Self::Denied { .. })
    }

    /// Render the view as the inner HTML of the status container.
    #[must_use]
    pub fn render(&self, config: &FinderConfig) -> String {
        let target = escape(&config.new_tab_target);
        match self {
            Self::Searching => "<h4>🛰️ Buscando sua Localização...</h4>\
                 <p>Conceda a permissão no navegador.</p>"
                .to_owned(),
            Self::Redirecting { url } => format!(
                "<h4>✅ Redirecionando para o Mapa...</h4>\
                 <p>Sua posição foi identificada. Se a tela não mudar em 5 segundos, \
                 {}.</p>",
                link(url, &target, "Clique Aqui")
            ),
            Self::Opened => format!(
                "<h4>✅ Mapa Aberto com Sucesso!</h4>\
                 <p>O Google Maps foi aberto em uma nova aba com a pesquisa \
                 \"{}\" centralizada em você.</p>{}",
                escape(&config.search_term),
                trigger(&config.trigger_id, "Abrir Mapa Novamente")
            ),
            Self::Denied { fallback } => format!(
                "<h4>❌ Acesso negado. Permita a localização para abrir o mapa centralizado.</h4>\
                 <p>O Google Maps do ABC será aberto em nova aba. \
                 Você pode pesquisar manualmente.</p>{}{}",
                link(fallback, &target, "Abrir Mapa Padrão (ABC)"),
                trigger(&config.trigger_id, "Tentar Novamente")
            ),
            Self::Unsupported => "<h4>🚫 Geolocalização Não Suportada</h4>\
                 <p>Seu dispositivo não suporta este recurso. \
                 Pesquise por Ecopontos no Google Maps.</p>"
                .to_owned(),
        }
    }
}

fn link(href: &str, target: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"{target}\" class=\"btn-cta\" style=\"{CTA_LINK_STYLE}\">{label}</a>",
        escape(href)
    )
}

fn trigger(id: &str, label: &str) -> String {
    format!(
        "<button id=\"{}\" class=\"btn-cta\" style=\"{CTA_BUTTON_STYLE}\">{label}</button>",
        escape(id)
    )
}

/// Escape text for use inside HTML content or a double-quoted attribute.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_desktop_success_and_denial_offer_a_trigger() {
        assert!(StatusView::Opened.offers_trigger());
        assert!(StatusView::Denied { fallback: String::new() }.offers_trigger());
        assert!(!StatusView::Searching.offers_trigger());
        assert!(!StatusView::Unsupported.offers_trigger());
        assert!(!StatusView::Redirecting { url: String::new() }.offers_trigger());
    }

    #[test]
    fn trigger_views_carry_the_trigger_id() {
        let config = FinderConfig::default();
        for view in [StatusView::Opened, StatusView::Denied { fallback: "x".into() }] {
            let html = view.render(&config);
            assert!(html.contains("<button id=\"simulate-location-btn\""), "{html}");
        }
        assert!(!StatusView::Unsupported.render(&config).contains("<button"));
        assert!(!StatusView::Searching.render(&config).contains("<button"));
    }

    #[test]
    fn redirect_offers_a_manual_link() {
        let html = StatusView::Redirecting {
            url: "https://www.google.com/maps/search/Ecoponto/@1.000000,2.000000".into(),
        }
        .render(&FinderConfig::default());
        assert!(html.contains("Redirecionando"));
        assert!(html.contains(
            "href=\"https://www.google.com/maps/search/Ecoponto/@1.000000,2.000000\" target=\"_blank\""
        ));
        assert!(html.contains("Clique Aqui"));
    }

    #[test]
    fn urls_are_attribute_escaped() {
        let html = StatusView::Denied {
            fallback: "https://x.test/?a=1&b=\"2\"".into(),
        }
        .render(&FinderConfig::default());
        assert!(html.contains("href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape("Santo André"), "Santo André");
        assert_eq!(escape("<b>'x'</b>"), "&lt;b&gt;&#39;x&#39;&lt;/b&gt;");
    }
}
