use crate::pages::ActivitiesPage;
use crate::providers::ActivitiesProvider;
use codequest_core::ApiConfig;
use yew::prelude::*;

/// Backend settings from the page URL: `?api=<base url>&token=<bearer>&seed=<n>`
#[derive(Debug, Clone, Default, PartialEq)]
struct UrlSettings {
    api: Option<ApiConfig>,
    seed: Option<u64>,
}

fn parse_settings(api: Option<String>, token: Option<String>, seed: Option<String>) -> UrlSettings {
    let api = api
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
        .map(|url| {
            let config = ApiConfig::new(url);
            match token.filter(|t| !t.is_empty()) {
                Some(token) => config.with_token(token),
                None => config,
            }
        });

    UrlSettings {
        api,
        seed: seed.and_then(|s| s.parse().ok()),
    }
}

fn settings_from_url() -> UrlSettings {
    let Some(window) = web_sys::window() else {
        return UrlSettings::default();
    };
    let Ok(href) = window.location().href() else {
        return UrlSettings::default();
    };
    let Ok(parsed) = web_sys::Url::new(&href) else {
        return UrlSettings::default();
    };

    let params = parsed.search_params();
    let settings = parse_settings(params.get("api"), params.get("token"), params.get("seed"));
    if let Some(api) = &settings.api {
        tracing::info!("Found api in URL: {}", api.base_url);
    }
    settings
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_memo((), |_| settings_from_url());

    html! {
        <div class="app">
            <ActivitiesProvider api={settings.api.clone()} seed={settings.seed}>
                <ActivitiesPage />
            </ActivitiesProvider>
        </div>
    }
}
