//! Entities are the legal persons that own accounts.

use chrono::{DateTime, NaiveDate, Utc};
use increase_core::codec::path_segment;
use increase_core::{Extras, Field, IncreaseError, Page, Pager, Transport, impl_api_object, string_enum};
use serde::{Deserialize, Serialize};

use crate::filters::TimeRange;

const PATH: &str = "entities";

string_enum! {
    pub enum EntityType {
        Entity => "entity",
    }
}

string_enum! {
    pub enum EntityStructure {
        Corporation => "corporation",
        NaturalPerson => "natural_person",
        Joint => "joint",
        Trust => "trust",
        GovernmentAuthority => "government_authority",
    }
}

string_enum! {
    /// Why a person counts as a beneficial owner.
    pub enum BeneficialOwnerProng {
        /// Owns 25% or more of the corporation.
        Ownership => "ownership",
        /// Exercises significant control.
        Control => "control",
    }
}

string_enum! {
    pub enum IdentificationMethod {
        SocialSecurityNumber => "social_security_number",
        IndividualTaxpayerIdentificationNumber => "individual_taxpayer_identification_number",
        Passport => "passport",
        DriversLicense => "drivers_license",
        Other => "other",
    }
}

/// A US street address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub line1: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub line2: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub city: Field<String>,
    /// Two-letter state code.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub zip: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// An identification document as reported back; only the last digits are returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identification {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub method: Field<IdentificationMethod>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub number_last4: Field<String>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Individual {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub date_of_birth: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address: Field<Address>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub identification: Field<Identification>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeneficialOwner {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub individual: Field<Individual>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_title: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub prong: Field<BeneficialOwnerProng>,
    #[serde(flatten)]
    pub extras: Extras,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corporation {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub website: Field<String>,
    /// The Employer Identification Number.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub tax_identifier: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub incorporation_state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address: Field<Address>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficial_owners: Field<Vec<BeneficialOwner>>,
    #[serde(flatten)]
    pub extras: Extras,
}

/// A legal person. Only the member matching `structure` is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub id: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub structure: Field<EntityStructure>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub corporation: Field<Corporation>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub natural_person: Field<Individual>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub created_at: Field<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Field::is_omitted")]
    pub object_type: Field<EntityType>,
    #[serde(flatten)]
    pub extras: Extras,
}

impl_api_object!(Entity, "entity");

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassportCreateParams {
    /// Two-letter ISO country code.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub country: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub expiration_date: Field<NaiveDate>,
    /// A file uploaded with purpose `identity_document`.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub file_id: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentificationCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub method: Field<IdentificationMethod>,
    /// The full identification number.
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub number: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub passport: Field<PassportCreateParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndividualCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub date_of_birth: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address: Field<Address>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub identification: Field<IdentificationCreateParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BeneficialOwnerCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub individual: Field<IndividualCreateParams>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub company_title: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub prong: Field<BeneficialOwnerProng>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorporationCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub name: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub website: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub tax_identifier: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub incorporation_state: Field<String>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub address: Field<Address>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub beneficial_owners: Field<Vec<BeneficialOwnerCreateParams>>,
}

/// Body of `POST /entities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityCreateParams {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub structure: Field<EntityStructure>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub corporation: Field<CorporationCreateParams>,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub description: Field<String>,
}

impl EntityCreateParams {
    /// A corporation entity; `structure` is set accordingly.
    pub fn corporation(corporation: CorporationCreateParams) -> Self {
        Self {
            structure: Field::Present(EntityStructure::Corporation),
            corporation: Field::Present(corporation),
            description: Field::Omitted,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<TimeRange>,
}

service! {
    /// `/entities`
    EntitiesService
}

impl<T: Transport> EntitiesService<T> {
    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn create(&self, params: &EntityCreateParams) -> Result<Entity, IncreaseError> {
        self.client.post(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn retrieve(&self, entity_id: &str) -> Result<Entity, IncreaseError> {
        self.client
            .get(&format!("{PATH}/{}", path_segment(entity_id)?), &self.options)
            .await
    }

    /// ## Errors
    ///
    /// Returns an [`IncreaseError`] if the request fails or is rejected.
    pub async fn list(&self, params: &EntityListParams) -> Result<Page<Entity, T>, IncreaseError> {
        self.client.list(PATH, params, &self.options).await
    }

    /// ## Errors
    ///
    /// Returns [`IncreaseError::Encode`] if `params` cannot be encoded.
    pub fn list_auto_paging(
        &self,
        params: &EntityListParams,
    ) -> Result<Pager<Entity, T>, IncreaseError> {
        self.client.list_auto_paging(PATH, params, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> Address {
        Address {
            line1: "33 Liberty Street".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip: "10045".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_corporation_create_body() {
        let params = EntityCreateParams::corporation(CorporationCreateParams {
            name: "National Phonograph Company".into(),
            tax_identifier: "602214076".into(),
            address: Field::Present(address()),
            beneficial_owners: Field::Present(vec![BeneficialOwnerCreateParams {
                individual: Field::Present(IndividualCreateParams {
                    name: "Ian Crease".into(),
                    date_of_birth: Field::Present(NaiveDate::from_ymd_opt(1970, 1, 31).unwrap()),
                    address: Field::Present(address()),
                    identification: Field::Present(IdentificationCreateParams {
                        method: Field::Present(IdentificationMethod::SocialSecurityNumber),
                        number: "078051120".into(),
                        ..Default::default()
                    }),
                }),
                prong: Field::Present(BeneficialOwnerProng::Control),
                ..Default::default()
            }]),
            ..Default::default()
        });
        let body = serde_json::to_value(params).unwrap();
        assert_eq!(body["structure"], json!("corporation"));
        assert_eq!(body["corporation"]["address"]["zip"], json!("10045"));
        let owner = &body["corporation"]["beneficial_owners"][0];
        assert_eq!(owner["individual"]["date_of_birth"], json!("1970-01-31"));
        assert_eq!(owner["prong"], json!("control"));
        assert!(owner.get("company_title").is_none());
        assert!(body["corporation"].get("website").is_none());
    }

    #[test]
    fn test_decode_corporation() {
        let entity: Entity = serde_json::from_value(json!({
            "id": "entity_n8y8tnk2p9339ti393yi",
            "structure": "corporation",
            "corporation": {
                "name": "National Phonograph Company",
                "beneficial_owners": [{
                    "individual": {
                        "name": "Ian Crease",
                        "identification": { "method": "social_security_number", "number_last4": "1120" }
                    },
                    "prong": "ownership"
                }]
            },
            "natural_person": null,
            "type": "entity"
        }))
        .unwrap();
        let owners = entity
            .corporation
            .value()
            .and_then(|c| c.beneficial_owners.value())
            .unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].prong, Field::Present(BeneficialOwnerProng::Ownership));
        assert!(entity.natural_person.is_null());
    }
}
