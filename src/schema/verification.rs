//! The verification schema: presence flags for the professional and
//! regulatory checklist of the Saudi Authority for Accredited Valuers.
//!
//! Every field carries the same contract: the model answers with the
//! literal "موجود" or "غير موجود", nothing else.

use super::{FieldDescriptor, FieldGroup, FieldKind, Schema, SchemaKind, ABSENT, PRESENT};

const PRESENCE_SET: &[&str] = &[PRESENT, ABSENT];

const PRESENCE_CONSTRAINT: &str =
    "هل هذا البند موجود؟ أجب بـ \"موجود\" أو \"غير موجود\" فقط.";

fn requirement(
    key: &'static str,
    label: &'static str,
    group: FieldGroup,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        kind: FieldKind::Enumerated(PRESENCE_SET),
        constraint: PRESENCE_CONSTRAINT,
        required: true,
        generated: false,
        group,
    }
}

/// Build the verification schema: 8 professional + 8 regulatory items.
pub fn schema() -> Schema {
    use FieldGroup::{Professional, Regulatory};
    let fields = vec![
        requirement("valuerIdentity", "هوية وصفة المقيم وتوقيعه", Professional),
        requirement("valuationDate", "تاريخ التقييم وتاريخ المعاينة", Professional),
        requirement("reportObjective", "الهدف من التقرير ونطاق العمل", Professional),
        requirement(
            "clientIdentity",
            "هوية العميل والجهات المستخدمة للتقرير",
            Professional,
        ),
        requirement("propertyRights", "الحقوق العقارية موضوع التقييم", Professional),
        requirement(
            "propertyDescription",
            "وصف تفصيلي للعقار ومكوناته",
            Professional,
        ),
        requirement(
            "analysisMethod",
            "أسلوب التقييم المستخدم والأساس المنطقي",
            Professional,
        ),
        requirement("finalValue", "القيمة النهائية للعقار والتوصيات", Professional),
        requirement(
            "complianceStatement",
            "إقرار الالتزام بمعايير التقييم الدولية",
            Regulatory,
        ),
        requirement(
            "independenceStatement",
            "إقرار عدم وجود مصلحة شخصية للمقيم",
            Regulatory,
        ),
        requirement(
            "taqeemStandards",
            "الإشارة إلى الالتزام بأنظمة الهيئة السعودية للمقيمين",
            Regulatory,
        ),
        requirement(
            "highestBestUse",
            "تحليل أعلى وأفضل استخدام للعقار",
            Regulatory,
        ),
        requirement("marketAnalysis", "تحليل السوق العقاري ذي الصلة", Regulatory),
        requirement("deedInfo", "بيانات الصك أو الوثيقة الرسمية للعقار", Regulatory),
        requirement("propertyBoundaries", "حدود وأطوال العقار وموقعه", Regulatory),
        requirement(
            "assumptions",
            "الافتراضات والظروف المقيدة للتقييم",
            Regulatory,
        ),
    ];
    Schema::new(SchemaKind::Verification, fields)
}
