// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::Converge;
use k8s_openapi::api::core::v1::Endpoints;

// Subsets are shared with the endpoints controller; this writer only owns metadata.
impl Converge for Endpoints {
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["subsets"];

    fn preserve_immutable_fields(&mut self, live: &Self) {
        self.subsets = live.subsets.clone();
    }
}

#[cfg(test)]
mod tests {
    use crate::converge::ResourceConverger;
    use crate::test_utils::MockService;
    use k8s_openapi::api::core::v1::{EndpointAddress, EndpointSubset, Endpoints};
    use kube::{api::ObjectMeta, Api};
    use serde_json::json;

    const PATH: &str = "/api/v1/namespaces/ns-1/endpoints/prometheus-operated";

    fn subset(ip: &str) -> EndpointSubset {
        EndpointSubset {
            addresses: Some(vec![EndpointAddress {
                ip: ip.to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    fn endpoints(ip: &str, resource_version: Option<&str>) -> Endpoints {
        Endpoints {
            metadata: ObjectMeta {
                name: Some("prometheus-operated".to_string()),
                namespace: Some("ns-1".to_string()),
                resource_version: resource_version.map(str::to_string),
                ..Default::default()
            },
            subsets: Some(vec![subset(ip)]),
        }
    }

    #[test]
    fn test_update_keeps_discovered_subsets() {
        let live = endpoints("10.0.0.1", Some("5"));
        let desired = endpoints("10.9.9.9", None);

        let submitted = ResourceConverger::default().prepare_update(&desired, &live);

        assert_eq!(submitted.subsets, live.subsets);
        assert_eq!(submitted.metadata.resource_version.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_create_writes_desired_subsets() {
        let created = endpoints("10.9.9.9", Some("1"));
        let mock = MockService::new().on_post(
            "/api/v1/namespaces/ns-1/endpoints",
            201,
            &serde_json::to_string(&created).unwrap(),
        );
        let api: Api<Endpoints> = Api::namespaced(mock.clone().into_client(), "ns-1");

        ResourceConverger::default()
            .create_or_update_endpoints(&api, &endpoints("10.9.9.9", None))
            .await
            .unwrap();

        let body = mock.last_body("POST").unwrap();
        assert_eq!(body["subsets"], json!([{"addresses": [{"ip": "10.9.9.9"}]}]));
    }

    #[tokio::test]
    async fn test_update_submits_live_subsets() {
        let live = endpoints("10.0.0.1", Some("5"));
        let live_json = serde_json::to_string(&live).unwrap();
        let mock = MockService::new()
            .on_get(PATH, 200, &live_json)
            .on_put(PATH, 200, &live_json);
        let api: Api<Endpoints> = Api::namespaced(mock.clone().into_client(), "ns-1");

        ResourceConverger::default()
            .create_or_update_endpoints(&api, &endpoints("10.9.9.9", None))
            .await
            .unwrap();

        let body = mock.last_body("PUT").unwrap();
        assert_eq!(body["subsets"], json!([{"addresses": [{"ip": "10.0.0.1"}]}]));
    }
}
