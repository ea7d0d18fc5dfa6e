use serde::{Deserialize, Serialize};

use super::dates;

/// One document record as stored by the remote docs API.
///
/// Field names on the wire are camelCase; both signature dates are
/// ISO-8601 date-time strings. Missing keys decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentRow {
    pub id: String,
    pub document_name: String,
    pub document_type: String,
    pub document_status: String,
    pub company_sig_date: String,
    pub company_signature_name: String,
    pub employee_number: String,
    pub employee_sig_date: String,
    pub employee_signature_name: String,
}

/// Editable fields of a [`DocumentRow`]. The id is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    DocumentName,
    DocumentType,
    DocumentStatus,
    CompanySigDate,
    CompanySignatureName,
    EmployeeNumber,
    EmployeeSigDate,
    EmployeeSignatureName,
}

impl RowField {
    /// All editable fields in display order.
    pub const ALL: [RowField; 8] = [
        RowField::DocumentName,
        RowField::DocumentType,
        RowField::DocumentStatus,
        RowField::CompanySigDate,
        RowField::CompanySignatureName,
        RowField::EmployeeNumber,
        RowField::EmployeeSigDate,
        RowField::EmployeeSignatureName,
    ];

    /// The JSON key, also used as the HTML form field name.
    pub fn key(self) -> &'static str {
        match self {
            RowField::DocumentName => "documentName",
            RowField::DocumentType => "documentType",
            RowField::DocumentStatus => "documentStatus",
            RowField::CompanySigDate => "companySigDate",
            RowField::CompanySignatureName => "companySignatureName",
            RowField::EmployeeNumber => "employeeNumber",
            RowField::EmployeeSigDate => "employeeSigDate",
            RowField::EmployeeSignatureName => "employeeSignatureName",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowField::DocumentName => "Name",
            RowField::DocumentType => "Type",
            RowField::DocumentStatus => "Status",
            RowField::CompanySigDate => "Company signature date",
            RowField::CompanySignatureName => "Company signature name",
            RowField::EmployeeNumber => "Employee number",
            RowField::EmployeeSigDate => "Employee signature date",
            RowField::EmployeeSignatureName => "Employee signature name",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, RowField::CompanySigDate | RowField::EmployeeSigDate)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl DocumentRow {
    /// A blank row carrying only its identifier.
    pub fn empty(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn get(&self, field: RowField) -> &str {
        match field {
            RowField::DocumentName => &self.document_name,
            RowField::DocumentType => &self.document_type,
            RowField::DocumentStatus => &self.document_status,
            RowField::CompanySigDate => &self.company_sig_date,
            RowField::CompanySignatureName => &self.company_signature_name,
            RowField::EmployeeNumber => &self.employee_number,
            RowField::EmployeeSigDate => &self.employee_sig_date,
            RowField::EmployeeSignatureName => &self.employee_signature_name,
        }
    }

    pub fn set(&mut self, field: RowField, value: String) {
        let slot = match field {
            RowField::DocumentName => &mut self.document_name,
            RowField::DocumentType => &mut self.document_type,
            RowField::DocumentStatus => &mut self.document_status,
            RowField::CompanySigDate => &mut self.company_sig_date,
            RowField::CompanySignatureName => &mut self.company_signature_name,
            RowField::EmployeeNumber => &mut self.employee_number,
            RowField::EmployeeSigDate => &mut self.employee_sig_date,
            RowField::EmployeeSignatureName => &mut self.employee_signature_name,
        };
        *slot = value;
    }

    /// True when the id and every editable field hold something besides whitespace.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && RowField::ALL.iter().all(|f| !self.get(*f).trim().is_empty())
    }

    /// Company signature date as `YYYY-MM-DD`, or the raw value if it does not parse.
    pub fn company_sig_day(&self) -> String {
        dates::display_day(&self.company_sig_date)
    }

    /// Employee signature date as `YYYY-MM-DD`, or the raw value if it does not parse.
    pub fn employee_sig_day(&self) -> String {
        dates::display_day(&self.employee_sig_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_serializes_with_camel_case_keys() {
        let mut row = DocumentRow::empty("r1");
        row.set(RowField::DocumentName, "Contract".into());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], "r1");
        assert_eq!(json["documentName"], "Contract");
        assert!(json.get("companySigDate").is_some());
        assert!(json.get("employeeSignatureName").is_some());
    }

    #[test]
    fn get_and_set_address_the_same_slot() {
        let mut row = DocumentRow::empty("r1");
        for (i, field) in RowField::ALL.into_iter().enumerate() {
            row.set(field, format!("v{i}"));
        }
        for (i, field) in RowField::ALL.into_iter().enumerate() {
            assert_eq!(row.get(field), format!("v{i}"));
        }
    }

    #[test]
    fn field_keys_round_trip() {
        for field in RowField::ALL {
            assert_eq!(RowField::from_key(field.key()), Some(field));
        }
        assert_eq!(RowField::from_key("id"), None);
    }

    #[test]
    fn only_signature_dates_are_date_fields() {
        let dates: Vec<_> = RowField::ALL.into_iter().filter(|f| f.is_date()).collect();
        assert_eq!(dates, vec![RowField::CompanySigDate, RowField::EmployeeSigDate]);
    }

    #[test]
    fn whitespace_field_makes_row_incomplete() {
        let mut row = DocumentRow::empty("r1");
        for field in RowField::ALL {
            row.set(field, "x".into());
        }
        assert!(row.is_complete());
        row.set(RowField::EmployeeNumber, "   ".into());
        assert!(!row.is_complete());
    }
}
