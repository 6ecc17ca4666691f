use std::path::Path;

use async_trait::async_trait;
use futures::io::AsyncReadExt;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{ListParams, LogParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, ResourceExt};
use tracing::debug;

use crate::errors::{AppError, AppResult, BoxError};
use crate::types::{LogPayload, PodRef};

const LIST_PAGE_SIZE: u32 = 500;

/// The cluster operations the log pipeline needs.
#[async_trait]
pub trait PodSource: Send + Sync {
    /// All pods in `namespace`, in the order the API returned them.
    async fn list_pods(&self, namespace: &str) -> AppResult<Vec<PodRef>>;

    /// Point-in-time read of a pod's current log buffer.
    async fn stream_log(&self, pod: &PodRef) -> AppResult<LogPayload>;
}

/// Load the kubeconfig at `path` into a client configuration.
pub async fn load_config(path: &Path) -> AppResult<Config> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| AppError::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| AppError::ConfigLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
}

/// Cluster access backed by a single `kube::Client`.
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Reachability is not checked here; the first request reports it.
    pub fn from_config(config: Config) -> AppResult<Self> {
        debug!("Connecting to cluster at {}", config.cluster_url);
        let client =
            Client::try_from(config).map_err(|e| AppError::ClientConstruction(Box::new(e)))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PodSource for KubeCluster {
    async fn list_pods(&self, namespace: &str) -> AppResult<Vec<PodRef>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let mut pods = Vec::new();
        let mut continue_token: Option<String> = None;

        loop {
            let mut lp = ListParams::default().limit(LIST_PAGE_SIZE);
            if let Some(token) = &continue_token {
                lp = lp.continue_token(token);
            }

            let page = api.list(&lp).await.map_err(|e| AppError::PodList {
                namespace: namespace.to_string(),
                source: describe_api_error(e),
            })?;

            debug!(
                "Listed {} pods in namespace {} (page {})",
                page.items.len(),
                namespace,
                if continue_token.is_some() { "continued" } else { "first" }
            );

            pods.extend(page.items.iter().map(|pod| {
                PodRef::new(
                    pod.namespace().unwrap_or_else(|| namespace.to_string()),
                    pod.name_any(),
                )
            }));

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        Ok(pods)
    }

    async fn stream_log(&self, pod: &PodRef) -> AppResult<LogPayload> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &pod.namespace);
        let stream_error = |source: BoxError| AppError::LogStream {
            namespace: pod.namespace.clone(),
            pod: pod.name.clone(),
            source,
        };

        // The reader lives only in this scope, so the connection is released
        // on every return path.
        let reader = api
            .log_stream(&pod.name, &LogParams::default())
            .await
            .map_err(|e| stream_error(describe_api_error(e)))?;
        let mut reader = std::pin::pin!(reader);

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| stream_error(Box::new(e)))?;

        debug!("Read {} bytes of logs from pod {}", bytes.len(), pod.name);
        Ok(LogPayload::from(bytes))
    }
}

fn describe_api_error(e: kube::Error) -> BoxError {
    if let kube::Error::Api(err) = &e {
        let hint = match err.code {
            401 => Some("unauthorized"),
            403 => Some("permission denied"),
            404 => Some("not found"),
            _ => None,
        };
        if let Some(hint) = hint {
            return format!("{hint} ({e})").into();
        }
    }
    Box::new(e)
}
