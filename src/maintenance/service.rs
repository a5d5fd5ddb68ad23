//! Remote CRUD calls for maintenance records.

use crate::{Error, api::ApiClient};

use super::{Maintenance, MaintenanceDraft, MaintenanceWire};

const MAINTENANCE_PATH: &str = "/maintenance";

/// Wraps the remote maintenance endpoints.
#[derive(Debug, Clone)]
pub struct MaintenanceService {
    client: ApiClient,
}

impl MaintenanceService {
    /// A service that talks through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every maintenance record, normalized with defaults filled in.
    ///
    /// # Errors
    /// Returns [Error::Network] if the call fails and [Error::UnexpectedShape]
    /// if the endpoint answers with something other than an array.
    pub async fn list(&self) -> Result<Vec<Maintenance>, Error> {
        let wires: Vec<MaintenanceWire> = self.client.get_list(MAINTENANCE_PATH).await?;
        tracing::debug!("fetched {} maintenance records", wires.len());

        Ok(wires.into_iter().map(Maintenance::from).collect())
    }

    /// Record a new maintenance job.
    ///
    /// # Errors
    /// Returns [Error::Validation] without touching the network if the draft
    /// fails the client-side checks.
    pub async fn create(&self, draft: &MaintenanceDraft) -> Result<Maintenance, Error> {
        draft.validate()?;

        let wire: MaintenanceWire = self
            .client
            .post_json(MAINTENANCE_PATH, &MaintenanceWire::from(draft))
            .await?;

        Ok(Maintenance::from(wire))
    }

    /// Overwrite the maintenance record with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record no longer exists remotely.
    pub async fn update(&self, id: u64, draft: &MaintenanceDraft) -> Result<Maintenance, Error> {
        draft.validate()?;

        let wire: MaintenanceWire = self
            .client
            .put_json(&format!("{MAINTENANCE_PATH}/{id}"), &MaintenanceWire::from(draft))
            .await?;

        Ok(Maintenance::from(wire))
    }

    /// Delete the maintenance record with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record has already been removed.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.client.delete(&format!("{MAINTENANCE_PATH}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{ApiClient, Error};

    use super::MaintenanceService;

    async fn service_for(server: &MockServer) -> MaintenanceService {
        let client = ApiClient::new(&server.uri()).expect("could not build client");
        MaintenanceService::new(client)
    }

    #[tokio::test]
    async fn list_normalizes_the_remote_amount_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maintenance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "date": "2024-03-10", "description": "brake pads", "amount": 2500.0}
            ])))
            .mount(&server)
            .await;

        let records = service_for(&server).await.list().await.expect("list failed");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cost, 2500.0);
        assert_eq!(records[0].van_no, "");
    }

    #[tokio::test]
    async fn updating_a_missing_record_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/maintenance/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let draft = crate::MaintenanceDraft {
            date: time::macros::date!(2024 - 03 - 10),
            van_no: "MH 12 AB 3456".to_owned(),
            driver_name: "Suresh Patel".to_owned(),
            description: "brake pads".to_owned(),
            cost: 2500.0,
            paid_by_driver: false,
        };
        let result = service_for(&server).await.update(7, &draft).await;

        assert_eq!(result, Err(Error::NotFound));
    }
}
