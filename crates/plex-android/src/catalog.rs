use plex_backend::CatalogEntry;

/// Payment apps probed through the package registry, by package name.
pub const ANDROID_PAYMENT_APPS: &[CatalogEntry] = &[
    CatalogEntry::new("com.google.android.apps.nfc.payment", "Google Pay", "tez"),
    CatalogEntry::new("com.phonepe.app", "PhonePe", "phonepe"),
    CatalogEntry::new("net.one97.paytm", "Paytm", "paytmmp"),
    CatalogEntry::new("com.credavenue.cred", "CRED", "credpay"),
    CatalogEntry::new("com.mobikwik_new", "MobiKwik", "mobikwik"),
    CatalogEntry::new("com.freecharge.android", "FreeCharge", "freecharge"),
    CatalogEntry::new("in.fampay.app", "FamPay", "in.fampay.app"),
    CatalogEntry::new("in.org.npci.upiapp", "BHIM", "bhim"),
    CatalogEntry::new("in.amazon.mShop.android.shopping", "Amazon Pay", "amazonpay"),
    CatalogEntry::new("com.naviapp", "Navi", "navi"),
    CatalogEntry::new("com.axis.mobile", "Axis Mobile", "kiwi"),
    CatalogEntry::new("com.enstage.wibmo.hdfc", "PayZapp", "payzapp"),
    CatalogEntry::new("money.jupiter.app", "Jupiter", "jupiter"),
    CatalogEntry::new("com.csam.icici.bank.imobile", "iMobile Pay", "icici"),
    CatalogEntry::new("com.sbi.lotza.mbanking", "YONO SBI", "sbiyono"),
    CatalogEntry::new("com.jio.myjio", "MyJio", "myjio"),
    CatalogEntry::new("com.sliceit.android", "Slice", "slice-upi"),
    CatalogEntry::new("com.barodampay.app", "Bank of Baroda UPI", "bobupi"),
    CatalogEntry::new("com.whatsapp", "WhatsApp", "whatsapp"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ANDROID_PAYMENT_APPS;

    #[test]
    fn package_names_are_unique() {
        let unique = ANDROID_PAYMENT_APPS
            .iter()
            .map(|entry| entry.identifier)
            .collect::<HashSet<_>>();

        assert_eq!(unique.len(), ANDROID_PAYMENT_APPS.len());
    }

    #[test]
    fn catalog_starts_with_google_pay() {
        assert_eq!(ANDROID_PAYMENT_APPS.len(), 19);
        assert_eq!(ANDROID_PAYMENT_APPS[0].display_name, "Google Pay");
        assert_eq!(ANDROID_PAYMENT_APPS[18].identifier, "com.whatsapp");
    }
}
