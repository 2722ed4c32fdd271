use {super::money::Amount, serde::Serialize};

/// Static catalog entry — defined at configuration time, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Amount,
    pub duration: &'static str,
    pub description: &'static str,
}

/// The packages on sale. Prices are catalog truth — client-sent amounts are
/// never trusted anywhere in the order path.
pub fn default_catalog() -> Vec<Package> {
    vec![
        Package {
            id: "chatgpt_plus_1_month",
            name: "Individual Plan",
            price: Amount::from_idr(25_000),
            duration: "1 Bulan",
            description: "Akses GPT-4 Unlimited dengan email pribadi sebagai Member",
        },
        Package {
            id: "team_package",
            name: "Team Plan",
            price: Amount::from_idr(95_000),
            duration: "1 Bulan",
            description: "Sampai 5 akun tim sebagai Member dengan akses penuh",
        },
    ]
}
