use crate::client::{encode_segment, Api, OCS_CLOUD};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::with_meta;
use crate::transport::Verb;
use nxc_core::translate::{texts, translate_single};
use nxc_core::{extract_meta, App, Meta, Siblings, WithMeta};

/// App management (`cloud/apps`).
#[derive(Debug, Clone)]
pub struct Apps {
    api: Api,
}

impl Apps {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(OCS_CLOUD),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_CLOUD),
        }
    }

    pub fn app(&self, appid: &str) -> AppScope {
        AppScope {
            api: self.api.clone(),
            appid: appid.to_string(),
        }
    }

    pub async fn enabled(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        self.filter("enabled").await
    }

    pub async fn disabled(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        self.filter("disabled").await
    }

    pub async fn find(&self, appid: &str) -> NextcloudResult<WithMeta<App>> {
        let doc = self
            .api
            .request(self.api.build(Verb::Get, &format!("/apps/{}", encode_segment(appid))))
            .await?;
        let app = translate_single(&doc, Siblings::Elements("ocs/data")).unwrap_or_default();
        Ok(with_meta(&doc, app))
    }

    async fn filter(&self, filter: &str) -> NextcloudResult<WithMeta<Vec<String>>> {
        let doc = self
            .api
            .request(self.api.build(Verb::Get, "/apps").query("filter", filter))
            .await?;
        Ok(with_meta(&doc, texts(&doc, "data/apps/element")))
    }
}

/// Enable or disable one app.
#[derive(Debug, Clone)]
pub struct AppScope {
    api: Api,
    appid: String,
}

impl AppScope {
    pub fn appid(&self) -> &str {
        &self.appid
    }

    pub async fn enable(&self) -> NextcloudResult<Meta> {
        self.send(Verb::Post).await
    }

    pub async fn disable(&self) -> NextcloudResult<Meta> {
        self.send(Verb::Delete).await
    }

    async fn send(&self, verb: Verb) -> NextcloudResult<Meta> {
        let req = self.api.build(verb, &format!("/apps/{}", encode_segment(&self.appid)));
        Ok(extract_meta(&self.api.request(req).await?))
    }
}
