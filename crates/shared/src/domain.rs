use std::collections::BTreeMap;

pub const PACKAGE_ID: &str = "packageId";
pub const STORING_ORDER_ID: &str = "storingOrderId";
pub const AIRWAY_BILL_NUMBER: &str = "airwayBillNumber";
pub const BILL_OF_ENTRY_ID: &str = "billOfEntryId";

/// A text input rendered on a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
}

const PACKAGE_LOOKUP_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: PACKAGE_ID,
    label: "Package ID",
}];

const STORING_ORDER_CHECK_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: STORING_ORDER_ID,
        label: "Storing Order ID",
    },
    FieldSpec {
        name: AIRWAY_BILL_NUMBER,
        label: "Airway Bill Number",
    },
    FieldSpec {
        name: BILL_OF_ENTRY_ID,
        label: "Bill of Entry ID",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewId {
    #[default]
    PackageLookup,
    StoringOrderCheck,
    ScanListing,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [
        ViewId::PackageLookup,
        ViewId::StoringOrderCheck,
        ViewId::ScanListing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewId::PackageLookup => "Package lookup",
            ViewId::StoringOrderCheck => "Storing order check",
            ViewId::ScanListing => "Scan APIs",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ViewId::PackageLookup => PACKAGE_LOOKUP_FIELDS,
            ViewId::StoringOrderCheck => STORING_ORDER_CHECK_FIELDS,
            ViewId::ScanListing => &[],
        }
    }
}

/// Text input values for one view, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_filled(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
