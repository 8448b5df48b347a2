//! Per-language copy used by prompts, normalization and user-facing results.

use entity::prelude::Language;

#[derive(Debug)]
pub struct LanguageProfile {
    /// Appended to every system prompt.
    pub instruction: &'static str,
    pub day_label: &'static str,
    pub wishes_note: &'static str,
    pub wishes_label: &'static str,
    pub untitled: &'static str,
    pub messages: Messages,
}

#[derive(Debug)]
pub struct Messages {
    pub looks_like: &'static str,
    pub possibly: &'static str,
    pub not_recognized_title: &'static str,
    pub not_recognized: &'static str,
    pub identify_failed_title: &'static str,
    pub identify_failed: &'static str,
    pub city_required: &'static str,
    pub days_out_of_range: &'static str,
    pub refine_fields_missing: &'static str,
    pub comment_required: &'static str,
    pub upstream_failed: &'static str,
    pub parse_failed: &'static str,
    pub empty_itinerary: &'static str,
    pub image_required: &'static str,
}

static RU: LanguageProfile = LanguageProfile {
    instruction: "Отвечай только на русском языке.",
    day_label: "День",
    wishes_note: "Пожелания могут быть написаны на другом языке, но ответ должен быть строго на русском.",
    wishes_label: "Пожелания туриста",
    untitled: "Без названия",
    messages: Messages {
        looks_like: "Похоже, что это",
        possibly: "Возможно, это",
        not_recognized_title: "Объект не распознан",
        not_recognized: "К сожалению, не удалось распознать объект. Попробуйте подойти ближе или изменить ракурс.",
        identify_failed_title: "Ошибка распознавания",
        identify_failed: "Сервис распознавания временно недоступен. Попробуйте ещё раз.",
        city_required: "Необходимо указать город",
        days_out_of_range: "Количество дней должно быть от 1 до 14",
        refine_fields_missing: "Не хватает данных для изменения дня",
        comment_required: "Опишите, что нужно изменить",
        upstream_failed: "Не удалось получить ответ от AI. Попробуйте ещё раз.",
        parse_failed: "Не удалось разобрать ответ от AI. Попробуйте ещё раз.",
        empty_itinerary: "AI не сгенерировал маршрут. Попробуйте ещё раз.",
        image_required: "Изображение не загружено",
    },
};

static EN: LanguageProfile = LanguageProfile {
    instruction: "Respond only in English.",
    day_label: "Day",
    wishes_note: "The wishes may be written in another language, but the answer must be strictly in English.",
    wishes_label: "Traveller's wishes",
    untitled: "Untitled",
    messages: Messages {
        looks_like: "Looks like",
        possibly: "Possibly",
        not_recognized_title: "Object not recognized",
        not_recognized: "Sorry, the object could not be recognized. Try moving closer or changing the angle.",
        identify_failed_title: "Recognition error",
        identify_failed: "The recognition service is temporarily unavailable. Please try again.",
        city_required: "City is required",
        days_out_of_range: "Number of days must be between 1 and 14",
        refine_fields_missing: "Not enough data to change the day",
        comment_required: "Describe what should be changed",
        upstream_failed: "Could not get a response from the AI. Please try again.",
        parse_failed: "Could not parse the AI response. Please try again.",
        empty_itinerary: "The AI did not produce an itinerary. Please try again.",
        image_required: "No image uploaded",
    },
};

static ZH: LanguageProfile = LanguageProfile {
    instruction: "只用简体中文回答。",
    day_label: "第{n}天",
    wishes_note: "用户的愿望可能用其他语言书写，但回答必须严格使用简体中文。",
    wishes_label: "游客的愿望",
    untitled: "未命名",
    messages: Messages {
        looks_like: "看起来像",
        possibly: "可能是",
        not_recognized_title: "未识别的物体",
        not_recognized: "抱歉，无法识别该物体。请靠近一些或换个角度再试。",
        identify_failed_title: "识别错误",
        identify_failed: "识别服务暂时不可用，请重试。",
        city_required: "请填写城市",
        days_out_of_range: "天数必须在 1 到 14 之间",
        refine_fields_missing: "修改当天行程的数据不完整",
        comment_required: "请描述需要修改的内容",
        upstream_failed: "未能获得 AI 的回复，请重试。",
        parse_failed: "无法解析 AI 的回复，请重试。",
        empty_itinerary: "AI 没有生成行程，请重试。",
        image_required: "未上传图片",
    },
};

pub fn profile(language: Language) -> &'static LanguageProfile {
    match language {
        Language::Ru => &RU,
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}

impl LanguageProfile {
    /// Localized 1-indexed day title, e.g. "Day 3".
    pub fn day_title(&self, number: usize) -> String {
        if self.day_label.contains("{n}") {
            self.day_label.replace("{n}", &number.to_string())
        } else {
            format!("{} {}", self.day_label, number)
        }
    }
}

/// Day count with the matching noun form, e.g. "3 дня", "5 days".
pub fn days_phrase(language: Language, count: i64) -> String {
    match language {
        Language::Ru => format!("{} {}", count, russian_days_word(count)),
        Language::En if count == 1 => "1 day".to_string(),
        Language::En => format!("{} days", count),
        Language::Zh => format!("{}天", count),
    }
}

fn russian_days_word(count: i64) -> &'static str {
    let last_two = count.abs() % 100;
    let last_one = count.abs() % 10;

    if (11..=19).contains(&last_two) {
        return "дней";
    }
    match last_one {
        1 => "день",
        2..=4 => "дня",
        _ => "дней",
    }
}
