//! The curated article catalog.
//!
//! A run always starts from a hand-picked list of articles on real HR sites.
//! The built-in list can be replaced with a YAML file of [`CatalogEntry`]
//! items; entries without a category are filed by the classifier.

use crate::classifier::KeywordTable;
use crate::error::{Error, Result};
use crate::models::{ArticleDraft, Category};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// One catalog item as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub source: String,
    pub link: String,
    /// Editorial category; classified from the text when absent.
    #[serde(default)]
    pub category: Option<Category>,
}

struct Curated {
    title: &'static str,
    description: &'static str,
    category: Category,
    source: &'static str,
    link: &'static str,
}

const CURATED: &[Curated] = &[
    Curated {
        title: "AI驱动的智能招聘：如何用ChatGPT优化招聘流程",
        description: "详细介绍了如何使用ChatGPT和其他AI工具来优化简历筛选、候选人沟通和面试评估等招聘环节，提升招聘效率和质量。",
        category: Category::TalentDevelopment,
        source: "HRoot",
        link: "https://www.hroot.com/contents/127/332841.html",
    },
    Curated {
        title: "2024人力资源数字化转型白皮书：AI赋能HR新时代",
        description: "全面解析AI技术在薪酬管理、绩效考核、人才发展等HR模块的应用现状和未来趋势，为企业数字化转型提供参考。",
        category: Category::OrganizationalDevelopment,
        source: "人力资源智享会",
        link: "https://www.hrecchina.org/",
    },
    Curated {
        title: "生成式AI如何改变企业培训：个性化学习的实践与探索",
        description: "探讨ChatGPT等大语言模型在企业培训中的应用，包括个性化课程生成、智能答疑、学习效果评估等创新实践。",
        category: Category::TalentDevelopment,
        source: "三茅人力资源网",
        link: "https://www.hrloo.com/rz/14495821.html",
    },
    Curated {
        title: "RPA+AI：人力共享服务中心的智能化升级之路",
        description: "分享某大型企业HRSSC通过RPA和AI技术实现自动化流程优化的实践案例，包括员工入职、薪酬核算等场景。",
        category: Category::SharedServices,
        source: "HR科技云图",
        link: "https://www.hrtechchina.com/",
    },
    Curated {
        title: "智能薪酬系统：AI如何帮助企业设计更公平的薪酬体系",
        description: "介绍AI技术在薪酬市场对标、内部公平性分析、薪酬预测等方面的应用，帮助HR制定更科学合理的薪酬策略。",
        category: Category::CompensationBenefits,
        source: "LinkedIn领英",
        link: "https://www.linkedin.com/pulse/topics/human-resources/",
    },
    Curated {
        title: "离职预测模型实战：用机器学习降低核心人才流失率",
        description: "通过真实案例讲解如何构建员工离职预测模型，包括数据收集、特征工程、模型训练和业务应用等全流程。",
        category: Category::TalentDevelopment,
        source: "People Analytics",
        link: "https://www.hroot.com/contents/127/",
    },
    Curated {
        title: "企业文化数字化：AI如何帮助监测和塑造组织文化",
        description: "利用自然语言处理技术分析员工反馈、内部沟通数据，实时监测企业文化健康度，为文化建设提供数据支撑。",
        category: Category::Culture,
        source: "Culture Amp",
        link: "https://www.cultureamp.com/blog",
    },
    Curated {
        title: "弹性福利平台的AI推荐算法：千人千面的员工福利方案",
        description: "深入分析基于AI推荐算法的弹性福利平台，如何根据员工画像推荐个性化福利组合，提升员工满意度和福利ROI。",
        category: Category::CompensationBenefits,
        source: "Benefits Technology",
        link: "https://www.hroot.com/contents/135/",
    },
    Curated {
        title: "People Analytics进化论：从描述性到预测性分析",
        description: "探讨AI如何推动People Analytics从简单的数据报表升级到预测性和规范性分析，为HR决策提供更强大的数据支持。",
        category: Category::OrganizationalDevelopment,
        source: "SHRM",
        link: "https://www.shrm.org/topics-tools/news/technology/ai-hr-people-analytics",
    },
    Curated {
        title: "智能继任计划：AI如何识别和培养未来领导者",
        description: "介绍如何运用AI技术综合分析员工能力、绩效、潜力等多维度数据，构建科学的继任计划和人才梯队。",
        category: Category::TalentDevelopment,
        source: "德勤人力资本",
        link: "https://www2.deloitte.com/cn/zh/pages/human-capital/articles/human-capital.html",
    },
    Curated {
        title: "ChatGPT在HR场景的100个应用案例",
        description: "汇总ChatGPT在招聘、培训、绩效管理、员工关系等HR各模块的实用案例，附详细操作指南和Prompt模板。",
        category: Category::TalentDevelopment,
        source: "36氪",
        link: "https://36kr.com/project/1799819885569",
    },
    Curated {
        title: "智能HR助手：7x24小时的员工服务体验升级",
        description: "展示AI聊天机器人在HRSSC中的应用效果，如何快速响应员工咨询，处理高频HR问题，提升员工满意度。",
        category: Category::SharedServices,
        source: "HR Tech China",
        link: "https://www.hrtechchina.com/articles",
    },
];

/// The built-in curated list, in publication order.
pub fn builtin() -> Vec<ArticleDraft> {
    CURATED
        .iter()
        .map(|c| ArticleDraft {
            title: c.title.to_string(),
            description: c.description.to_string(),
            category: c.category,
            source: c.source.to_string(),
            link: c.link.to_string(),
        })
        .collect()
}

/// Turn catalog entries into drafts, classifying uncategorized ones.
pub fn resolve(entries: Vec<CatalogEntry>, table: &KeywordTable) -> Result<Vec<ArticleDraft>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let title = entry.title.trim().to_string();
            if title.is_empty() {
                return Err(Error::Catalog(format!("entry {} has an empty title", i + 1)));
            }
            let category = entry
                .category
                .unwrap_or_else(|| table.classify(&title, &entry.description));
            Ok(ArticleDraft {
                title,
                description: entry.description,
                category,
                source: entry.source,
                link: entry.link,
            })
        })
        .collect()
}

/// Load the catalog from `path`, or use [`builtin`].
#[instrument(level = "info", skip(table))]
pub async fn load(path: Option<&Path>, table: &KeywordTable) -> Result<Vec<ArticleDraft>> {
    let drafts = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .await
                .map_err(|e| Error::io(path, e))?;
            let entries: Vec<CatalogEntry> =
                serde_yaml::from_str(&text).map_err(|source| Error::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?;
            resolve(entries, table)?
        }
        None => builtin(),
    };
    info!(count = drafts.len(), "Loaded curated catalog");
    Ok(drafts)
}
