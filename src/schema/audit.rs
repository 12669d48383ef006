//! The audit (extraction) schema: property/report facts plus
//! image-presence descriptions.
//!
//! Labels and constraints are the domain contract with the upstream
//! model — Arabic throughout, closed sets for the enumerated fields,
//! western digits for numeric fields, `DD/MM/YYYY` for dates.

use super::{FieldDescriptor, FieldGroup, FieldKind, Schema, SchemaKind};

/// Valuer membership categories recognized by the authority.
pub const MEMBERSHIP_CATEGORIES: &[&str] =
    &["أساسي", "أساسي زميل", "شريك", "طالب منتسب"];

pub const PROPERTY_TYPES: &[&str] = &["سكني", "تجاري", "زراعي", "سكني/تجاري"];

pub const EVALUATION_PURPOSES: &[&str] = &[
    "التمويل",
    "الشراء",
    "البيع",
    "التصفيه",
    "الدمج",
    "الاستحواذ",
    "الميراث",
    "حل النزاعات",
    "القرض العقاري",
];

pub const OWNERSHIP_TYPES: &[&str] = &["ملكية خاصة", "حكومي"];

pub const REPORT_TYPES: &[&str] = &["تقرير مفصل", "ملخص تنفيذي"];

pub const EVALUATION_METHODS: &[&str] =
    &["طريقة السوق", "طريقة الدخل", "طريقة التكلفة"];

fn fact(
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    constraint: &'static str,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        kind,
        constraint,
        required: true,
        generated: false,
        group: FieldGroup::Fact,
    }
}

fn image(
    key: &'static str,
    label: &'static str,
    constraint: &'static str,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        kind: FieldKind::Text,
        constraint,
        required: true,
        generated: false,
        group: FieldGroup::Image,
    }
}

/// Build the audit schema. Field order is the export column order.
pub fn schema() -> Schema {
    let fields = vec![
        // Generated by the orchestrator, never requested from the model.
        FieldDescriptor {
            key: "reportNumber",
            label: "رقم تقرير",
            kind: FieldKind::Text,
            constraint: "",
            required: false,
            generated: true,
            group: FieldGroup::Fact,
        },
        fact(
            "evaluatorName",
            "اسم المقيم",
            FieldKind::Text,
            "اسم المقيّم الكامل. استخرج الاسم فقط بدون أي ألقاب (مثل: أ./، م./) أو مناصب.",
        ),
        fact(
            "membershipNumber",
            "رقم العضوية",
            FieldKind::Text,
            "رقم عضوية المقيّم",
        ),
        fact(
            "membershipCategory",
            "فئة العضوية",
            FieldKind::Enumerated(MEMBERSHIP_CATEGORIES),
            "فئة عضوية المقيّم. يجب أن تكون واحدة من: 'أساسي'، 'أساسي زميل'، 'شريك'، 'طالب منتسب'",
        ),
        fact(
            "evaluatorEmail",
            "البريد الإلكتروني للمقيم",
            FieldKind::Text,
            "البريد الإلكتروني للمقيّم",
        ),
        fact(
            "ownerName",
            "اسم مالك العقار",
            FieldKind::Text,
            "اسم مالك العقار. استخرج الاسم فقط بدون أي ألقاب أو مناصب.",
        ),
        fact(
            "ownerId",
            "رقم هوية المالك",
            FieldKind::Text,
            "رقم هوية المالك (الهوية الوطنية أو السجل التجاري). يجب أن يكون أرقام إنجليزية فقط.",
        ),
        fact(
            "evaluationPurpose",
            "الغرض من التقييم",
            FieldKind::Enumerated(EVALUATION_PURPOSES),
            "الغرض من التقييم. يجب أن يكون واحداً من: 'التمويل'، 'الشراء'، 'البيع'، 'التصفيه'، 'الدمج'، 'الاستحواذ'، 'الميراث'، 'حل النزاعات'، 'القرض العقاري'",
        ),
        fact(
            "reportType",
            "نوع التقرير",
            FieldKind::Enumerated(REPORT_TYPES),
            "نوع تقرير التقييم. يجب أن تكون الإجابة واحدة من: 'تقرير مفصل'، 'ملخص تنفيذي'.",
        ),
        fact(
            "evaluationMethod",
            "أسلوب التقييم",
            FieldKind::Enumerated(EVALUATION_METHODS),
            "الأسلوب المستخدم في تقييم العقار. يجب أن تكون الإجابة واحدة من: 'طريقة السوق'، 'طريقة الدخل'، 'طريقة التكلفة'.",
        ),
        fact(
            "propertyType",
            "نوع العقار",
            FieldKind::Enumerated(PROPERTY_TYPES),
            "نوع العقار. يجب أن يكون واحداً من: 'سكني'، 'تجاري'، 'زراعي'، 'سكني/تجاري'",
        ),
        fact(
            "ownershipType",
            "نوع الملكية",
            FieldKind::Enumerated(OWNERSHIP_TYPES),
            "نوع ملكية العقار. يجب أن تكون الإجابة واحدة من: 'ملكية خاصة'، 'حكومي'.",
        ),
        fact(
            "propertyArea",
            "مساحة العقار (م2)",
            FieldKind::Number,
            "مساحة العقار بالأرقام الإنجليزية فقط (0-9). لا تقم بتضمين الوحدة \"م2\".",
        ),
        fact(
            "pricePerMeter",
            "قيمة المتر",
            FieldKind::Number,
            "القيمة السوقية للمتر المربع بالأرقام الإنجليزية فقط (0-9).",
        ),
        fact(
            "marketValue",
            "القيمة السوقية للعقار (ريال سعودي)",
            FieldKind::Number,
            "القيمة السوقية الإجمالية للعقار بالأرقام الإنجليزية فقط (0-9). لا تقم بتضمين العملة.",
        ),
        fact(
            "marketValueWritten",
            "القيمة السوقية للعقار (كتابة)",
            FieldKind::Text,
            "القيمة السوقية الإجمالية للعقار مكتوبة بالأحرف كما هي في التقرير.",
        ),
        fact(
            "region",
            "المنطقة",
            FieldKind::Text,
            "المنطقة الإدارية التي يقع فيها العقار. يجب أن تكون واحدة من مناطق المملكة الـ 13 (مثال: 'الرياض', 'مكة المكرمة').",
        ),
        fact(
            "propertyCity",
            "مدينة العقار",
            FieldKind::Text,
            "مدينة العقار",
        ),
        fact(
            "propertyDistrict",
            "الحي",
            FieldKind::Text,
            "حي العقار",
        ),
        fact(
            "planNumber",
            "رقم المخطط",
            FieldKind::Text,
            "رقم المخطط",
        ),
        fact(
            "deedNumber",
            "رقم الصك",
            FieldKind::Text,
            "رقم صك الملكية",
        ),
        // Requested from the model but not part of the completeness gate.
        FieldDescriptor {
            key: "deedDate",
            label: "تاريخ إصدار الصك",
            kind: FieldKind::Text,
            constraint: "تاريخ إصدار صك الملكية. أعده بصيغة 'DD/MM/YYYY'.",
            required: false,
            generated: false,
            group: FieldGroup::Fact,
        },
        fact(
            "inspectionDate",
            "تاريخ المعاينة",
            FieldKind::Text,
            "تاريخ معاينة العقار من قبل المقيّم. أعده بصيغة 'DD/MM/YYYY'.",
        ),
        fact(
            "valuationDate",
            "تاريخ التقييم (بالميلادي)",
            FieldKind::Text,
            "تاريخ التقييم الفعلي للعقار. أعده بصيغة 'DD/MM/YYYY'.",
        ),
        fact(
            "reportIssueDate",
            "إصدار التقرير",
            FieldKind::Text,
            "تاريخ إصدار التقرير النهائي. أعده بصيغة 'DD/MM/YYYY'.",
        ),
        fact(
            "propertyCoordinates",
            "إحداثيات العقار",
            FieldKind::Text,
            "ضع رابط خرائط جوجل (Google Maps) الكامل لموقع العقار. مثال: 'https://www.google.com/maps?q=24.7136,46.6753'",
        ),
        fact(
            "restrictions",
            "القيود",
            FieldKind::Text,
            "أي قيود أو شروط مفروضة على العقار. إذا لم تكن هناك قيود، أرجع النص الحرفي 'لا توجد قيود'. وإلا، لخصها في جملة واحدة بحد أقصى 10 كلمات.",
        ),
        image(
            "deedImage",
            "صورة الصك",
            "صف بإيجاز محتوى صورة صك الملكية. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "membershipImage",
            "صورة العضوية",
            "صف بإيجاز محتوى صورة شهادة عضوية المقيّم. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "propertyExteriorImage",
            "صورة للعقار خارجية",
            "صف بإيجاز محتوى الصورة الفوتوغرافية الخارجية للعقار. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "propertyInteriorImage",
            "صورة للعقار داخلية",
            "صف بإيجاز محتوى الصورة الفوتوغرافية الداخلية للعقار. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "siteAerialImage",
            "صورة جوية للموقع",
            "صف بإيجاز محتوى الصورة الجوية لموقع العقار. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "buildingPermitImage",
            "صورة رخصة البناء",
            "صف بإيجاز محتوى صورة رخصة البناء. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
        image(
            "assignmentLetterImage",
            "خطاب تكليف بالتقييم",
            "صف بإيجاز محتوى صورة خطاب التكليف بالتقييم. إذا لم يتم العثور عليها، أرجع النص الحرفي 'غير موجود'.",
        ),
    ];
    Schema::new(SchemaKind::Audit, fields)
}
