//! Fixed domain instructions handed to the extraction service.
//!
//! Both prompts open with the disambiguation rule: a file that is not a
//! recognizable valuation report returns an empty array immediately.

use crate::schema::SchemaKind;

/// Audit instructions: extract every property report in the file.
pub const AUDIT_INSTRUCTIONS: &str = "أنت خبير في تحليل تقارير التقييم العقاري باللغة العربية. مهمتك هي تحليل ملف PDF المرفق بدقة.
قاعدة أساسية: قبل أي تحليل، تحقق إذا كان الملف المرفق هو \"تقرير تقييم عقاري\". إذا لم يكن كذلك، أرجع مصفوفة فارغة [] مباشرة.
إذا كان تقريراً صالحاً، فاستخرج جميع تقارير العقارات الموجودة فيه. يجب أن يكون تحليلك متسقًا وحتميًا؛ لنفس الملف، يجب أن تُرجع دائمًا نفس النتيجة تمامًا. أرجع النتائج كمصفوفة (array) من كائنات JSON، حيث يمثل كل كائن تقريراً واحداً.

    التزم بالقواعد التالية بدقة:
    - **الأسماء:** بالنسبة لأسماء الأشخاص (مثل المقيّم أو المالك)، استخرج الاسم الكامل فقط بدون أي ألقاب (مثل السيد/، المهندس/) أو مناصب وظيفية.
    - **الأرقام:** استخدم الأرقام العربية الغربية (0-9) لجميع القيم الرقمية.
    - **مساحة العقار والقيمة السوقية:** استخرج القيمة الرقمية فقط، بدون أي وحدات أو عملات.
    - **إحداثيات العقار:** قدم رابط خرائط جوجل (Google Maps) كامل للموقع.
    - **نوع العقار:** يجب أن يكون واحداً من: 'سكني'، 'تجاري'، 'زراعي'، 'سكني/تجاري'.
    - **الغرض من التقييم:** يجب أن يكون واحداً من: 'التمويل'، 'الشراء'، 'البيع'، 'التصفيه'، 'الدمج'، 'الاستحواذ'، 'الميراث'، 'حل النزاعات'، 'القرض العقاري'.
    - **فئة العضوية:** يجب أن تكون واحدة من: 'أساسي'، 'أساسي زميل'، 'شريك'، 'طالب منتسب'.
    - **القيود:** إذا لم تكن هناك أي قيود مذكورة، أو ذكر النص صراحة عدم وجودها (مثل \"لا يوجد\"، \"لا قيود\")، فأرجع النص الحرفي \"لا توجد قيود\". وإلا، لخص القيود في جملة واحدة بحد أقصى 10 كلمات.
    - **القيم غير الموجودة:** إذا كانت معلومة غير موجودة، أرجع قيمة 'غير موجود' حرفيًا.
    - **الصور:** صف محتوى كل صورة بإيجاز. إذا لم تجد صورة، أرجع 'غير موجود'.";

/// Verification instructions: per-requirement presence check only.
pub const VERIFICATION_INSTRUCTIONS: &str = "أنت خبير محترف في تدقيق تقارير التقييم العقاري في المملكة العربية السعودية ومتخصص في معايير الهيئة السعودية للمقيمين المعتمدين (تقييم).
قاعدة أساسية: قبل أي تحليل، تحقق إذا كان الملف المرفق هو \"تقرير تقييم عقاري\". إذا لم يكن كذلك، أرجع مصفوفة فارغة [] مباشرة.
إذا كان تقريراً صالحاً، فمهمتك هي تحليل ملف PDF المرفق والتحقق من وجود المتطلبات المهنية والنظامية. لكل متطلب في الهيكل المطلوب، تحقق من وجوده في التقرير وأجب بـ \"موجود\" أو \"غير موجود\" فقط. لا تقدم أي شروحات إضافية. كن دقيقاً جداً. أرجع النتائج كمصفوفة (array) من كائنات JSON، حيث يمثل كل كائن تقريراً واحداً تم العثور عليه في الملف.";

/// The fixed instruction text for a schema kind.
pub fn instructions(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Audit => AUDIT_INSTRUCTIONS,
        SchemaKind::Verification => VERIFICATION_INSTRUCTIONS,
    }
}
