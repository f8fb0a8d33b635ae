use plex_backend::CatalogEntry;

const fn scheme_entry(scheme: &'static str, name: &'static str) -> CatalogEntry {
    CatalogEntry::new(scheme, name, scheme)
}

/// Payment apps probed by URL scheme. The scheme doubles as the identifier.
pub const IOS_PAYMENT_APPS: &[CatalogEntry] = &[
    scheme_entry("tez", "Google Pay"),
    scheme_entry("phonepe", "PhonePe"),
    scheme_entry("paytmmp", "Paytm"),
    scheme_entry("credpay", "CRED"),
    scheme_entry("mobikwik", "MobiKwik"),
    scheme_entry("freecharge", "FreeCharge"),
    scheme_entry("in.fampay.app", "FamPay"),
    scheme_entry("bhim", "BHIM"),
    scheme_entry("amazonpay", "Amazon Pay"),
    scheme_entry("navi", "Navi"),
    scheme_entry("kiwi", "Kiwi"),
    scheme_entry("payzapp", "PayZapp"),
    scheme_entry("jupiter", "Jupiter"),
    scheme_entry("omnicard", "Omni Card"),
    scheme_entry("icici", "iMobile Pay"),
    scheme_entry("popclubapp", "PopClub"),
    scheme_entry("sbiyono", "YONO SBI"),
    scheme_entry("myjio", "MyJio"),
    scheme_entry("slice-upi", "Slice"),
    scheme_entry("bobupi", "Bank of Baroda UPI"),
    scheme_entry("shriramone", "Shriram One"),
    scheme_entry("indusmobile", "IndusInd Bank"),
    scheme_entry("whatsapp", "WhatsApp"),
];
