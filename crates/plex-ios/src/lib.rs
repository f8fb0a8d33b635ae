mod catalog;
mod host;
mod lookup;
mod provider;

pub use catalog::IOS_PAYMENT_APPS;
pub use host::{BundleInfo, IosHost, SchemeProber, SystemUrlOpener, UrlOpener};
pub use lookup::{ITUNES_LOOKUP_URL, ItunesLookup, LookupError, StoreListing, StoreLookup};
pub use provider::IosProvider;
