//! Static church contact book.

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChurchInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub cep: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PastorContact {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    /// Digits only, country code first.
    pub whatsapp: String,
    pub description: String,
}

impl PastorContact {
    #[must_use]
    pub fn whatsapp_link(&self) -> String {
        format!("https://wa.me/{}", self.whatsapp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialMedia {
    pub instagram: String,
    pub facebook: String,
    pub youtube: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub cells: String,
    pub youth: String,
    pub sunday: String,
    pub prayer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactBook {
    pub church: ChurchInfo,
    pub pastors: Vec<PastorContact>,
    pub social_media: SocialMedia,
    pub schedule: Schedule,
}

#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn contact_book(&self) -> ContactBook;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContacts;

#[async_trait]
impl ContactDirectory for StaticContacts {
    async fn contact_book(&self) -> ContactBook {
        ContactBook {
            church: ChurchInfo {
                name: "Igreja Videira Francisco Morato".into(),
                address: "Rua das Flores, 123 - Centro, Francisco Morato - SP".into(),
                phone: "(11) 4488-0000".into(),
                email: "contato@videira-franciscomorato.com.br".into(),
                website: "www.videira-franciscomorato.com.br".into(),
                cep: "07944-000".into(),
            },
            pastors: vec![
                PastorContact {
                    id: 1,
                    name: "Pr. Marcelo Sato".into(),
                    role: "Pastor Supervisor da Igreja Videira em Células".into(),
                    phone: "(11) 99999-0001".into(),
                    email: "marcelo.sato@videira.com.br".into(),
                    whatsapp: "5511999990001".into(),
                    description: "Responsável pela supervisão geral das células da Igreja Videira Francisco Morato"
                        .into(),
                },
                PastorContact {
                    id: 2,
                    name: "Pr. Hugo Dias".into(),
                    role: "Pastor de Jovens - Radicais Livres".into(),
                    phone: "(11) 99999-0002".into(),
                    email: "hugo.dias@videira.com.br".into(),
                    whatsapp: "5511999990002".into(),
                    description: "Pastor responsável pelo ministério de jovens Radicais Livres".into(),
                },
            ],
            social_media: SocialMedia {
                instagram: "@radicaislivres_fm".into(),
                facebook: "Radicais Livres Francisco Morato".into(),
                youtube: "Igreja Videira Francisco Morato".into(),
                website: "www.radicaislivres.com.br".into(),
            },
            schedule: Schedule {
                cells: "Terças e Quintas - 19h30".into(),
                youth: "Sábados - 19h00".into(),
                sunday: "Domingos - 9h00 e 19h00".into(),
                prayer: "Quartas - 19h30".into(),
            },
        }
    }
}
