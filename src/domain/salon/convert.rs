//! Conversions: salon wire types ↔ Salon domain types.

use super::wire::{CreateSalonResponse, CredentialsResponse, SalonBody, SalonResponse};
use super::{CreatedSalon, Salon, SalonCredentials, SalonDraft};

impl From<SalonResponse> for Salon {
    fn from(resp: SalonResponse) -> Self {
        Salon {
            id: resp.id,
            name: resp.name,
            location: resp.location,
            contact_number: resp.contact_number,
            username: resp.username.filter(|u| !u.is_empty()),
            plain_password: resp.plain_password.filter(|p| !p.is_empty()),
            created_at: resp.created_at,
        }
    }
}

impl From<CredentialsResponse> for SalonCredentials {
    fn from(c: CredentialsResponse) -> Self {
        SalonCredentials {
            username: c.username,
            password: c.password,
        }
    }
}

impl From<CreateSalonResponse> for CreatedSalon {
    fn from(resp: CreateSalonResponse) -> Self {
        CreatedSalon {
            salon: resp.salon.into(),
            credentials: resp.credentials.map(Into::into),
            qr_code: resp.qr_code,
        }
    }
}

impl From<&SalonDraft> for SalonBody {
    fn from(draft: &SalonDraft) -> Self {
        SalonBody {
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            contact_number: draft.contact_number.trim().to_string(),
        }
    }
}
