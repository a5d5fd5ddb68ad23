//! Remote CRUD calls for fuel purchases.
//!
//! The remote resource is named `/diesel` for historical reasons.

use crate::{Error, api::ApiClient};

use super::{Fuel, FuelDraft, FuelWire};

const FUEL_PATH: &str = "/diesel";

/// Wraps the remote fuel endpoints.
#[derive(Debug, Clone)]
pub struct FuelService {
    client: ApiClient,
}

impl FuelService {
    /// A service that talks through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every fuel purchase, normalized with defaults filled in.
    ///
    /// # Errors
    /// Returns [Error::Network] if the call fails and [Error::UnexpectedShape]
    /// if the endpoint answers with something other than an array.
    pub async fn list(&self) -> Result<Vec<Fuel>, Error> {
        let wires: Vec<FuelWire> = self.client.get_list(FUEL_PATH).await?;
        tracing::debug!("fetched {} fuel records", wires.len());

        Ok(wires.into_iter().map(Fuel::from).collect())
    }

    /// Record a new fuel purchase.
    ///
    /// # Errors
    /// Returns [Error::Validation] without touching the network if the draft
    /// fails the client-side checks.
    pub async fn create(&self, draft: &FuelDraft) -> Result<Fuel, Error> {
        draft.validate()?;

        let wire: FuelWire = self
            .client
            .post_json(FUEL_PATH, &FuelWire::from(draft))
            .await?;

        Ok(Fuel::from(wire))
    }

    /// Overwrite the fuel purchase with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record no longer exists remotely.
    pub async fn update(&self, id: u64, draft: &FuelDraft) -> Result<Fuel, Error> {
        draft.validate()?;

        let wire: FuelWire = self
            .client
            .put_json(&format!("{FUEL_PATH}/{id}"), &FuelWire::from(draft))
            .await?;

        Ok(Fuel::from(wire))
    }

    /// Delete the fuel purchase with the given ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the record has already been removed.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        self.client.delete(&format!("{FUEL_PATH}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path},
    };

    use crate::{ApiClient, FuelDraft};

    use super::FuelService;

    async fn service_for(server: &MockServer) -> FuelService {
        let client = ApiClient::new(&server.uri()).expect("could not build client");
        FuelService::new(client)
    }

    #[tokio::test]
    async fn create_targets_the_diesel_resource() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/diesel"))
            .and(body_partial_json(json!({"amount": 4200.0, "vanNo": "VAN001"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 11,
                "date": "2024-03-12",
                "description": "full tank",
                "amount": 4200.0,
                "driverName": "Default Driver"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = FuelDraft {
            date: time::macros::date!(2024 - 03 - 12),
            driver_name: None,
            description: "full tank".to_owned(),
            cost: 4200.0,
            paid_by_driver: false,
        };
        let record = service_for(&server)
            .await
            .create(&draft)
            .await
            .expect("create failed");

        assert_eq!(record.id, 11);
        assert_eq!(record.cost, 4200.0);
    }
}
